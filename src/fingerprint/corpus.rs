//! Signature corpus: CMS names and the markers that betray them.
//!
//! Entries are authored as a CMS name plus a list of marker strings. A marker
//! prefixed with `generator:` only applies to the content of the
//! `<meta name="generator">` tag; every other marker is searched in the
//! response body (and headers). At load time each entry is compiled into a
//! [`Signature`] holding the two marker groups separately.
//!
//! Corpus order is significant: the matcher returns the first signature that
//! matches, so earlier entries win ties.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error_handling::CorpusError;

/// Prefix scoping a marker to the generator meta tag content.
pub const GENERATOR_PREFIX: &str = "generator:";

/// Built-in signatures, in tie-break order.
const BUILTIN_SIGNATURES: &[(&str, &[&str])] = &[
    (
        "WordPress",
        &[
            "wp-content",
            "wp-includes",
            "xmlrpc.php",
            "wp-json",
            "wp-login.php",
            "generator:wordpress",
            "powered by wordpress",
        ],
    ),
    (
        "Joomla",
        &[
            "Joomla!",
            "Joomla CMS",
            "com_content",
            "administrator/components",
            "generator:joomla",
            "powered by joomla",
        ],
    ),
    (
        "Drupal",
        &[
            "drupal.js",
            "sites/all/modules",
            "generator:drupal",
            "drupal-settings",
            "powered by drupal",
        ],
    ),
    (
        "Magento",
        &[
            "Mage.Cookies",
            "varien/js",
            "generator:magento",
            "adminhtml/default",
            "powered by magento",
        ],
    ),
    (
        "Shopify",
        &[
            "cdn.shopify.com",
            "shopify-checkout",
            "generator:shopify",
            "shopify-section",
        ],
    ),
    (
        "Wix",
        &["wix.com", "X-Wix-Request-Id", "generator:wix", "powered by wix"],
    ),
    (
        "Squarespace",
        &[
            "squarespace.com",
            "generator:squarespace",
            "powered by squarespace",
        ],
    ),
    (
        "TYPO3",
        &["typo3temp/", "typo3conf/", "generator:typo3", "typo3_src"],
    ),
    (
        "PrestaShop",
        &[
            "prestashop",
            "generator:prestashop",
            "js/jquery/plugins/jquery.easing.js",
        ],
    ),
    (
        "BigCommerce",
        &["cdn.bigcommerce.com", "bigcommerce.js", "stencil-cli"],
    ),
    (
        "Blogger",
        &["blogger.com", "generator:blogger", "blogspot.com"],
    ),
    (
        "OpenCart",
        &[
            "index.php?route=",
            "generator:opencart",
            "catalog/view/theme",
        ],
    ),
    (
        "Bitrix",
        &["bitrix/templates", "generator:bitrix", "bx-core"],
    ),
    ("Ghost", &["ghost.js", "generator:ghost", "powered by ghost"]),
    (
        "osCommerce",
        &["osCommerce", "oscommerce.js", "admin/login.php"],
    ),
    (
        "Concrete5",
        &["concrete/js", "generator:concrete5", "ccm_basePath"],
    ),
    (
        "ExpressionEngine",
        &[
            "ExpressionEngine",
            "generator:expressionengine",
            "exp:channel",
        ],
    ),
    (
        "SilverStripe",
        &["SilverStripe", "generator:silverstripe", "framework/core"],
    ),
    (
        "Weebly",
        &["weebly.com", "generator:weebly", "powered by weebly"],
    ),
    (
        "Django",
        &["X-Powered-By: Django", "django-admin", "csrfmiddlewaretoken"],
    ),
    (
        "Flask",
        &["X-Powered-By: Flask", "werkzeug.debug", "flask.session"],
    ),
    (
        "MediaWiki",
        &["generator:mediawiki", "Special:Version", "mw-config"],
    ),
    ("vBulletin", &["vBulletin", "generator:vbulletin", "vb_login"]),
    ("phpBB", &["phpBB", "phpbb.js", "viewtopic.php"]),
    ("XenForo", &["xenforo", "generator:xenforo", "xf_user"]),
    (
        "Moodle",
        &["Moodle", "generator:moodle", "theme/yui_combo.php"],
    ),
    ("Zyro", &["zyro.com", "generator:zyro", "powered by zyro"]),
    ("MODX", &["MODX", "generator:modx", "connectors/index.php"]),
    ("Contao", &["contao", "generator:contao", "system/modules"]),
    ("Umbraco", &["Umbraco", "generator:umbraco", "umbraco_client"]),
    ("Plone", &["plone.app", "portal_css", "generator:plone"]),
    ("Kentico", &["Kentico", "CMSPages", "generator:kentico"]),
    (
        "Sitefinity",
        &["Sitefinity", "Telerik.Sitefinity", "generator:sitefinity"],
    ),
    (
        "Liferay",
        &["Liferay", "generator:liferay", "portal_normal.vm"],
    ),
];

/// A signature entry as authored (and as stored in external signature files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub cms_name: String,
    pub markers: Vec<String>,
}

/// Returns the built-in signature entries in corpus order.
pub fn builtin_entries() -> Vec<SignatureEntry> {
    BUILTIN_SIGNATURES
        .iter()
        .map(|(name, markers)| SignatureEntry {
            cms_name: (*name).to_string(),
            markers: markers.iter().map(|m| (*m).to_string()).collect(),
        })
        .collect()
}

/// A compiled marker: literal text matched case-insensitively anywhere in a haystack.
#[derive(Debug, Clone)]
pub struct Marker {
    text: String,
    pattern: Regex,
}

impl Marker {
    fn compile(cms_name: &str, text: &str) -> Result<Self, CorpusError> {
        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .map_err(|source| CorpusError::InvalidMarker {
                cms: cms_name.to_string(),
                marker: text.to_string(),
                source,
            })?;
        Ok(Self {
            text: text.to_string(),
            pattern,
        })
    }

    /// The marker text without any scope prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }
}

/// A compiled signature with body markers and generator markers kept apart.
#[derive(Debug, Clone)]
pub struct Signature {
    cms_name: String,
    body_markers: Vec<Marker>,
    generator_markers: Vec<Marker>,
}

impl Signature {
    fn compile(entry: &SignatureEntry) -> Result<Self, CorpusError> {
        let cms_name = entry.cms_name.trim();
        if cms_name.is_empty() {
            return Err(CorpusError::EmptyName);
        }

        let mut body_markers = Vec::new();
        let mut generator_markers = Vec::new();
        for raw in &entry.markers {
            match strip_generator_prefix(raw) {
                Some(scoped) => {
                    let scoped = scoped.trim();
                    if !scoped.is_empty() {
                        generator_markers.push(Marker::compile(cms_name, scoped)?);
                    }
                }
                // An empty marker would match every response.
                None if raw.trim().is_empty() => {}
                None => body_markers.push(Marker::compile(cms_name, raw)?),
            }
        }

        if body_markers.is_empty() && generator_markers.is_empty() {
            return Err(CorpusError::NoMarkers(cms_name.to_string()));
        }

        Ok(Self {
            cms_name: cms_name.to_string(),
            body_markers,
            generator_markers,
        })
    }

    pub fn cms_name(&self) -> &str {
        &self.cms_name
    }

    /// Markers searched in the body (and headers).
    pub fn body_markers(&self) -> &[Marker] {
        &self.body_markers
    }

    /// Markers searched only in the generator meta content.
    pub fn generator_markers(&self) -> &[Marker] {
        &self.generator_markers
    }

    fn to_entry(&self) -> SignatureEntry {
        let markers = self
            .body_markers
            .iter()
            .map(|m| m.text().to_string())
            .chain(
                self.generator_markers
                    .iter()
                    .map(|m| format!("{GENERATOR_PREFIX}{}", m.text())),
            )
            .collect();
        SignatureEntry {
            cms_name: self.cms_name.clone(),
            markers,
        }
    }
}

fn strip_generator_prefix(marker: &str) -> Option<&str> {
    let head = marker.get(..GENERATOR_PREFIX.len())?;
    if head.eq_ignore_ascii_case(GENERATOR_PREFIX) {
        Some(&marker[GENERATOR_PREFIX.len()..])
    } else {
        None
    }
}

/// Immutable, ordered collection of compiled signatures.
///
/// Built once at start-up and shared read-only (behind an `Arc`) by every
/// probe worker.
#[derive(Debug, Clone)]
pub struct SignatureCorpus {
    signatures: Vec<Signature>,
}

impl SignatureCorpus {
    /// Compiles the built-in corpus.
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_entries(&builtin_entries())
    }

    /// Compiles and validates a corpus from authored entries, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate or empty CMS names, on entries without
    /// usable markers, and on markers that fail to compile.
    pub fn from_entries(entries: &[SignatureEntry]) -> Result<Self, CorpusError> {
        let mut seen = HashSet::new();
        let mut signatures = Vec::with_capacity(entries.len());
        for entry in entries {
            let signature = Signature::compile(entry)?;
            if !seen.insert(signature.cms_name.to_lowercase()) {
                return Err(CorpusError::DuplicateCms(signature.cms_name));
            }
            signatures.push(signature);
        }
        Ok(Self { signatures })
    }

    /// Parses a JSON array of `{"cms_name": ..., "markers": [...]}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let entries: Vec<SignatureEntry> = serde_json::from_str(json)?;
        Self::from_entries(&entries)
    }

    /// Loads a signature file in the format accepted by [`Self::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, CorpusError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Signatures in corpus order.
    pub fn lookup(&self) -> &[Signature] {
        &self.signatures
    }

    /// Signatures converted back to their authored form.
    pub fn entries(&self) -> Vec<SignatureEntry> {
        self.signatures.iter().map(Signature::to_entry).collect()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
