// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tab selection persisted in the `?tab=` query parameter.

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::DashboardError;

/// Query parameter holding the active tab.
pub const TAB_PARAM: &str = "tab";

/// Query string parameters, kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parses a query string with or without the leading `?`.
    ///
    /// Keys and values are percent-decoded and `+` reads as a space.
    /// Pairs without `=` are kept with an empty value; empty pairs are
    /// skipped.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let params: BTreeMap<String, String> = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { params }
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Renders the parameters as `?k=v&...` with keys and values
    /// percent-encoded, or an empty string when there are none.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

/// Decodes one query component. Malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let spaced: String = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), Cow::into_owned)
}

/// Active tab of a tabbed page, validated against an allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPersistence {
    default_tab: String,
    valid_tabs: Vec<String>,
    active: String,
}

impl TabPersistence {
    /// Creates tab state starting on `default_tab`.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_tab` is not one of `valid_tabs`.
    pub fn new(default_tab: &str, valid_tabs: &[&str]) -> Result<Self, DashboardError> {
        if !valid_tabs.contains(&default_tab) {
            return Err(DashboardError::Validation(format!(
                "Default tab '{default_tab}' is not one of the valid tabs"
            )));
        }
        Ok(Self {
            default_tab: default_tab.to_string(),
            valid_tabs: valid_tabs.iter().map(|t| (*t).to_string()).collect(),
            active: default_tab.to_string(),
        })
    }

    /// Returns true if `tab` is on the allow-list.
    #[must_use]
    pub fn is_valid(&self, tab: &str) -> bool {
        self.valid_tabs.iter().any(|t| t == tab)
    }

    /// The tab `params` selects, or the default when the parameter is
    /// missing, empty or not allowed.
    #[must_use]
    pub fn resolve<'a>(&'a self, params: &'a QueryParams) -> &'a str {
        match requested_tab(params) {
            Some(tab) if self.is_valid(tab) => tab,
            _ => &self.default_tab,
        }
    }

    /// Adopts the tab from `params`, correcting an invalid value in
    /// `params` to the default. A missing or empty parameter is left as
    /// it is.
    pub fn sync_url(&mut self, params: &mut QueryParams) {
        let resolved: String = self.resolve(params).to_string();
        if let Some(requested) = requested_tab(params)
            && requested != resolved
        {
            debug!(requested = %requested, corrected = %resolved, "Correcting invalid tab parameter");
            params.set(TAB_PARAM, &resolved);
        }
        self.active = resolved;
    }

    /// Switches to `tab` and records it in `params`.
    ///
    /// Returns false and changes nothing if `tab` is not allowed.
    pub fn set_active_tab(&mut self, tab: &str, params: &mut QueryParams) -> bool {
        if !self.is_valid(tab) {
            warn!(tab = %tab, "Ignoring request for unknown tab");
            return false;
        }
        self.active = tab.to_string();
        params.set(TAB_PARAM, tab);
        true
    }

    /// The tab currently shown.
    #[must_use]
    pub fn active_tab(&self) -> &str {
        &self.active
    }

    /// The tab shown when none is requested.
    #[must_use]
    pub fn default_tab(&self) -> &str {
        &self.default_tab
    }
}

/// The `tab` value of `params`. An empty value counts as no value.
fn requested_tab(params: &QueryParams) -> Option<&str> {
    params.get(TAB_PARAM).filter(|tab| !tab.is_empty())
}
