//! Device hints supplied by CDNs and edge proxies.

use viewport_types::{DeviceClass, RequestHeaders};

/// Amazon CloudFront viewer flags, checked in this order.
const CLOUDFRONT_FLAGS: &[(&str, DeviceClass)] = &[
    ("cloudfront-is-android-viewer", DeviceClass::Mobile),
    ("cloudfront-is-desktop-viewer", DeviceClass::Desktop),
    ("cloudfront-is-ios-viewer", DeviceClass::Mobile),
    ("cloudfront-is-mobile-viewer", DeviceClass::Mobile),
    ("cloudfront-is-smarttv-viewer", DeviceClass::Tv),
    ("cloudfront-is-tablet-viewer", DeviceClass::Tablet),
];

/// Cloudflare device type header.
const CLOUDFLARE_DEVICE_TYPE: &str = "cf-device-type";

/// Whether `name` carries a single-valued device hint.
///
/// Hosts merging repeated headers keep the first value for these.
pub fn is_device_hint_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(CLOUDFLARE_DEVICE_TYPE)
        || CLOUDFRONT_FLAGS.iter().any(|(header, _)| name.eq_ignore_ascii_case(header))
}

/// Resolve a device class from infrastructure headers.
///
/// CloudFront boolean flags win over the Cloudflare device type. A flag only
/// counts when its value is exactly `true`.
pub fn device_class_from_headers(headers: &RequestHeaders) -> Option<DeviceClass> {
    let cloudfront = CLOUDFRONT_FLAGS
        .iter()
        .find(|(header, _)| headers.get(header).map(str::trim) == Some("true"))
        .map(|(header, device)| {
            tracing::debug!("[detect] device hint from {}: {}", header, device);
            device.clone()
        });
    if cloudfront.is_some() {
        return cloudfront;
    }

    headers
        .get(CLOUDFLARE_DEVICE_TYPE)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            tracing::debug!("[detect] device hint from {}: {}", CLOUDFLARE_DEVICE_TYPE, value);
            DeviceClass::parse(value)
        })
}
