//! Cookie parsing, `Set-Cookie` rendering and cookie stores.
//!
//! The only artifact persisted by the viewport manager is one cookie whose
//! value is a plain breakpoint name.

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use viewport_types::{CookieError, CookieOptions};

const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";
const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a `Cookie` request header into name/value pairs.
///
/// Pairs are separated by `;` and split on the first `=`. Pairs without `=`
/// are skipped; a repeated name keeps the last value.
pub fn parse_cookie_header(input: &str) -> BTreeMap<String, String> {
    input
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_graphic() && !matches!(b, b'=' | b';' | b','))
}

fn validate(name: &str, value: &str) -> Result<(), CookieError> {
    if !is_token(name) {
        return Err(CookieError::InvalidName { name: name.to_string() });
    }
    if !value.is_empty() && !is_token(value) {
        return Err(CookieError::Rejected {
            name: name.to_string(),
            message: format!("value {value:?} is not a cookie token"),
        });
    }
    Ok(())
}

fn push_attributes(cookie: &mut String, options: &CookieOptions) {
    if let Some(domain) = &options.domain {
        cookie.push_str(&format!("; Domain={domain}"));
    }
    if let Some(path) = &options.path {
        cookie.push_str(&format!("; Path={path}"));
    }
    if let Some(same_site) = options.same_site {
        cookie.push_str(&format!("; SameSite={same_site}"));
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
}

/// Render a `Set-Cookie` header value writing `value` under `name`.
pub fn render_set_cookie(
    name: &str,
    value: &str,
    options: &CookieOptions,
    now: DateTime<Utc>,
) -> Result<String, CookieError> {
    validate(name, value)?;

    let mut cookie = format!("{name}={value}");
    if let Some(days) = options.expires_days {
        let expires = TimeDelta::try_days(i64::from(days))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| CookieError::Rejected {
                name: name.to_string(),
                message: format!("expiry of {days} days is out of range"),
            })?;
        cookie.push_str(&format!(
            "; Max-Age={}; Expires={}",
            i64::from(days) * SECONDS_PER_DAY,
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ));
    }
    push_attributes(&mut cookie, options);
    Ok(cookie)
}

/// Render a `Set-Cookie` header value that deletes `name`.
pub fn render_removal(name: &str, options: &CookieOptions) -> Result<String, CookieError> {
    validate(name, "")?;

    let mut cookie = format!("{name}=; Max-Age=0; Expires={EXPIRED_DATE}");
    push_attributes(&mut cookie, options);
    Ok(cookie)
}

/// Cookie read/write capability.
///
/// Implementations use interior mutability; the manager is single-threaded.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError>;

    fn remove(&self, name: &str, options: &CookieOptions) -> Result<(), CookieError>;
}

/// In-process cookie store.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RefCell<BTreeMap<String, String>>,
    writes: Cell<u64>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a `Cookie` header.
    pub fn from_header(header: &str) -> Self {
        Self { cookies: RefCell::new(parse_cookie_header(header)), writes: Cell::new(0) }
    }

    /// Number of successful writes and removals.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str, _options: &CookieOptions) -> Result<(), CookieError> {
        validate(name, value)?;
        self.cookies.borrow_mut().insert(name.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, name: &str, _options: &CookieOptions) -> Result<(), CookieError> {
        validate(name, "")?;
        self.cookies.borrow_mut().remove(name);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Cookie store for one HTTP exchange.
///
/// Reads see the request cookies overlaid with this response's writes; every
/// write is recorded as a `Set-Cookie` header value.
#[derive(Debug, Default)]
pub struct ResponseCookieJar {
    cookies: RefCell<BTreeMap<String, String>>,
    set_cookie: RefCell<Vec<String>>,
}

impl ResponseCookieJar {
    pub fn from_request_header(header: Option<&str>) -> Self {
        Self {
            cookies: RefCell::new(header.map(parse_cookie_header).unwrap_or_default()),
            set_cookie: RefCell::new(Vec::new()),
        }
    }

    /// `Set-Cookie` values to emit, in write order.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.set_cookie.borrow().clone()
    }
}

impl CookieStore for ResponseCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError> {
        let header = render_set_cookie(name, value, options, Utc::now())?;
        self.cookies.borrow_mut().insert(name.to_string(), value.to_string());
        self.set_cookie.borrow_mut().push(header);
        Ok(())
    }

    fn remove(&self, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
        let header = render_removal(name, options)?;
        self.cookies.borrow_mut().remove(name);
        self.set_cookie.borrow_mut().push(header);
        Ok(())
    }
}
