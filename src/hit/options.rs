//! Typed hit options supplied by the caller.

use super::params::TrackingParameters;
use std::fmt;
use std::str::FromStr;

/// Measurement Protocol hit types (`t`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitType {
    Pageview,
    Screenview,
    Event,
    Transaction,
    Item,
    Social,
    Exception,
    Timing,
}

impl HitType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HitType::Pageview => "pageview",
            HitType::Screenview => "screenview",
            HitType::Event => "event",
            HitType::Transaction => "transaction",
            HitType::Item => "item",
            HitType::Social => "social",
            HitType::Exception => "exception",
            HitType::Timing => "timing",
        }
    }
}

impl fmt::Display for HitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pageview" => Ok(HitType::Pageview),
            "screenview" => Ok(HitType::Screenview),
            "event" => Ok(HitType::Event),
            "transaction" => Ok(HitType::Transaction),
            "item" => Ok(HitType::Item),
            "social" => Ok(HitType::Social),
            "exception" => Ok(HitType::Exception),
            "timing" => Ok(HitType::Timing),
            other => Err(format!("unknown hit type: {}", other)),
        }
    }
}

/// Options for one hit.
///
/// Named fields cover the common parameters. Anything else goes through
/// [`param`](Self::param); extension entries are applied last and win over
/// the named fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitOptions {
    /// Tracking ID, e.g. `UA-XXXXX-Y` (required)
    pub tid: Option<String>,
    /// Hit type
    pub t: Option<HitType>,
    /// Client ID
    pub cid: Option<String>,
    /// User ID
    pub uid: Option<String>,
    /// Document path
    pub dp: Option<String>,
    /// Document host name
    pub dh: Option<String>,
    /// Document location URL
    pub dl: Option<String>,
    /// Document title
    pub dt: Option<String>,
    /// Event category
    pub ec: Option<String>,
    /// Event action
    pub ea: Option<String>,
    /// Event label
    pub el: Option<String>,
    /// Event value
    pub ev: Option<u64>,
    /// Data source
    pub ds: Option<String>,
    /// User agent override
    pub ua: Option<String>,
    /// IP override
    pub uip: Option<String>,
    /// Additional raw parameters, in insertion order
    pub extra: Vec<(String, String)>,
}

impl HitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tid(mut self, tid: impl Into<String>) -> Self {
        self.tid = Some(tid.into());
        self
    }

    pub fn hit_type(mut self, t: HitType) -> Self {
        self.t = Some(t);
        self
    }

    pub fn cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn document_path(mut self, dp: impl Into<String>) -> Self {
        self.dp = Some(dp.into());
        self
    }

    pub fn document_host(mut self, dh: impl Into<String>) -> Self {
        self.dh = Some(dh.into());
        self
    }

    pub fn document_location(mut self, dl: impl Into<String>) -> Self {
        self.dl = Some(dl.into());
        self
    }

    pub fn document_title(mut self, dt: impl Into<String>) -> Self {
        self.dt = Some(dt.into());
        self
    }

    /// Event category, action and optional label.
    pub fn event(
        mut self,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<String>,
    ) -> Self {
        self.t = Some(HitType::Event);
        self.ec = Some(category.into());
        self.ea = Some(action.into());
        self.el = label;
        self
    }

    pub fn event_value(mut self, ev: u64) -> Self {
        self.ev = Some(ev);
        self
    }

    pub fn data_source(mut self, ds: impl Into<String>) -> Self {
        self.ds = Some(ds.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.ua = Some(ua.into());
        self
    }

    pub fn ip_override(mut self, uip: impl Into<String>) -> Self {
        self.uip = Some(uip.into());
        self
    }

    /// Set an arbitrary parameter; a repeated key replaces the earlier value.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.extra.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.extra.push((key, value)),
        }
        self
    }

    /// Flatten into parameters: named fields first, then extension entries.
    pub fn to_parameters(&self) -> TrackingParameters {
        let mut params = TrackingParameters::new();

        let named: [(&str, Option<String>); 15] = [
            ("tid", self.tid.clone()),
            ("t", self.t.map(|t| t.as_str().to_string())),
            ("cid", self.cid.clone()),
            ("uid", self.uid.clone()),
            ("dp", self.dp.clone()),
            ("dh", self.dh.clone()),
            ("dl", self.dl.clone()),
            ("dt", self.dt.clone()),
            ("ec", self.ec.clone()),
            ("ea", self.ea.clone()),
            ("el", self.el.clone()),
            ("ev", self.ev.map(|v| v.to_string())),
            ("ds", self.ds.clone()),
            ("ua", self.ua.clone()),
            ("uip", self.uip.clone()),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                params.insert(key, value);
            }
        }

        for (key, value) in &self.extra {
            params.insert(key.as_str(), value);
        }

        params
    }
}
