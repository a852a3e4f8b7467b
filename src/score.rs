//! Score cookie
//!
//! A won round stores `life × level` in the `puntuacion` cookie. A lost round
//! writes an empty value that expired 100 days ago, which deletes it.

use crate::sim::Outcome;

/// Cookie key
pub const SCORE_COOKIE: &str = "puntuacion";

/// How far in the past a loss back-dates the cookie
pub const EXPIRED_DAYS: f64 = 100.0;

const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A cookie write derived from a round outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCookie {
    pub value: String,
    /// Back-date the expiry so the browser drops the cookie
    pub expired: bool,
}

impl ScoreCookie {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Won { score } => Self {
                value: score.to_string(),
                expired: false,
            },
            Outcome::Lost { .. } => Self {
                value: String::new(),
                expired: true,
            },
        }
    }

    /// Expiry timestamp (ms since epoch) for an expired cookie
    pub fn expiry_ms(&self, now_ms: f64) -> Option<f64> {
        self.expired.then(|| now_ms - EXPIRED_DAYS * DAY_MS)
    }

    /// `document.cookie` assignment string
    pub fn header(&self, expires: Option<&str>) -> String {
        match expires {
            Some(date) => format!("{}={};expires={}", SCORE_COOKIE, self.value, date),
            None => format!("{}={}", SCORE_COOKIE, self.value),
        }
    }

    /// Write the cookie (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn store(&self) {
        use wasm_bindgen::JsCast;

        let expires = self.expiry_ms(js_sys::Date::now()).map(|ms| {
            String::from(js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms)).to_utc_string())
        });
        let header = self.header(expires.as_deref());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());
        match document {
            Some(doc) => match doc.set_cookie(&header) {
                Ok(()) => log::info!("Score cookie written: {}", header),
                Err(e) => log::warn!("Could not write score cookie: {:?}", e),
            },
            None => log::warn!("No HTML document, score cookie not written"),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn store(&self) {
        log::info!("Score cookie (native, not stored): {}", self.header(None));
    }
}

/// Score from a previous won round, read from a `document.cookie` string
pub fn last_score(cookies: &str) -> Option<u32> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SCORE_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Read the previous score from the page cookies (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_last_score() -> Option<u32> {
    use wasm_bindgen::JsCast;

    let doc = web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?;
    last_score(&doc.cookie().ok()?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_last_score() -> Option<u32> {
    None
}
