// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State behind a permalink field.
//!
//! A map view usually offers a link that reproduces the current state,
//! optionally passed through a URL shortener before it is shown. [`Permalink`]
//! keeps the raw value and the resolved display value apart, resolves only
//! when the raw value actually changes, and hands the display value to a
//! [`Clipboard`] on request. The widget, the shortening service, and the
//! platform clipboard are collaborators behind the [`UrlShortener`] and
//! [`Clipboard`] traits.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::future::Future;
use core::pin::Pin;

/// A deferred shortening result. `None` means the service could not shorten
/// the URL.
pub type ShortenFuture<'a> = Pin<Box<dyn Future<Output = Option<String>> + 'a>>;

/// A URL-shortening service.
pub trait UrlShortener {
    /// Shortens `url`.
    fn shorten<'a>(&'a self, url: &'a str) -> ShortenFuture<'a>;
}

/// Receives text to copy.
pub trait Clipboard {
    /// Copies `text`.
    fn copy(&mut self, text: &str);
}

/// Raw and displayed value of a permalink.
#[derive(Default)]
pub struct Permalink {
    value: Option<String>,
    display: Option<String>,
    shortener: Option<Box<dyn UrlShortener>>,
}

impl fmt::Debug for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permalink")
            .field("value", &self.value)
            .field("display", &self.display)
            .field("shortener", &self.shortener.is_some())
            .finish()
    }
}

impl Permalink {
    /// Creates a permalink that displays values verbatim.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a permalink that displays shortened values.
    #[must_use]
    pub fn with_shortener(shortener: impl UrlShortener + 'static) -> Self {
        Self {
            shortener: Some(Box::new(shortener)),
            ..Self::default()
        }
    }

    /// Returns the last raw value passed to [`update`](Self::update).
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the value to show, or `None` if there is nothing to show yet.
    ///
    /// An empty value counts as nothing to show.
    #[must_use]
    pub fn display_value(&self) -> Option<&str> {
        self.display.as_deref().filter(|v| !v.is_empty())
    }

    /// Sets the raw value and resolves the display value.
    ///
    /// Does nothing and returns `false` if `value` equals the previous value.
    /// The first update always resolves.
    ///
    /// If the shortener yields `None`, the raw value is displayed rather than
    /// nothing, so a failing shortening service still leaves a usable link.
    pub async fn update(&mut self, value: &str) -> bool {
        if self.value.as_deref() == Some(value) {
            return false;
        }
        self.value = Some(String::from(value));

        let resolved = match &self.shortener {
            Some(shortener) => shortener.shorten(value).await,
            None => None,
        };
        self.display = Some(resolved.unwrap_or_else(|| String::from(value)));
        true
    }

    /// Copies the display value to `clipboard`.
    ///
    /// Returns whether anything was copied.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> bool {
        match self.display_value() {
            Some(text) => {
                clipboard.copy(text);
                true
            }
            None => false,
        }
    }
}
