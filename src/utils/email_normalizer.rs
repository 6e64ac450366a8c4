//! Email address normalization.
//!
//! Gives every address a single stored representation so that
//! `John.Doe@Gmail.com` and `johndoe@gmail.com` sign in to the same account.
//! Subaddress rules follow what each large mail provider delivers to the
//! same mailbox.

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
    "outlook.com",
    "outlook.co.uk",
    "hotmail.com",
    "hotmail.co.uk",
    "hotmail.fr",
    "hotmail.de",
    "live.com",
    "live.co.uk",
    "msn.com",
    "passport.com",
];

const YAHOO_DOMAINS: &[&str] = &[
    "yahoo.com",
    "yahoo.co.uk",
    "yahoo.fr",
    "yahoo.de",
    "ymail.com",
    "rocketmail.com",
];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com"];

/// Mail providers whose mailboxes ignore part of the local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Gmail,
    Outlook,
    Yahoo,
    Icloud,
}

impl Provider {
    fn for_domain(domain: &str) -> Option<Self> {
        if GMAIL_DOMAINS.contains(&domain) {
            Some(Provider::Gmail)
        } else if OUTLOOK_DOMAINS.contains(&domain) {
            Some(Provider::Outlook)
        } else if YAHOO_DOMAINS.contains(&domain) {
            Some(Provider::Yahoo)
        } else if ICLOUD_DOMAINS.contains(&domain) {
            Some(Provider::Icloud)
        } else {
            None
        }
    }

    /// Strips the subaddress the provider ignores.
    fn strip_tag(self, local: &str) -> &str {
        match self {
            Provider::Yahoo => local.rsplit_once('-').map_or(local, |(base, _)| base),
            _ => local.split('+').next().unwrap_or(local),
        }
    }
}

/// Normalizes an email address to its canonical form.
///
/// # Normalization Rules
///
/// 1. **Whitespace**: Leading and trailing whitespace is removed
/// 2. **Case**: The whole address is lowercased
/// 3. **Gmail**: For `gmail.com` / `googlemail.com`, dots and any `+tag`
///    suffix are removed from the local part and the domain becomes `gmail.com`
/// 4. **Outlook, iCloud**: any `+tag` suffix is removed
/// 5. **Yahoo**: the last `-tag` suffix is removed
///
/// A tag is kept when removing it would leave the local part empty.
///
/// The input is expected to have passed
/// [`crate::utils::field_validator::is_valid_email`]; values without an `@`
/// are returned trimmed and lowercased.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_email(" John@Admin.COM "), "john@admin.com");
/// assert_eq!(normalize_email("J.Doe+news@googlemail.com"), "jdoe@gmail.com");
/// assert_eq!(normalize_email("jane-shop@yahoo.com"), "jane@yahoo.com");
/// ```
pub fn normalize_email(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return lowered;
    };

    let Some(provider) = Provider::for_domain(domain) else {
        return lowered;
    };

    let stripped = provider.strip_tag(local);
    if stripped.is_empty() {
        return lowered;
    }

    match provider {
        Provider::Gmail => format!("{}@gmail.com", stripped.replace('.', "")),
        _ => format!("{stripped}@{domain}"),
    }
}
