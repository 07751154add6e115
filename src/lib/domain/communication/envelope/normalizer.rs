//! Email address normalization

/// Mailbox providers with their own canonicalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Google,
    Apple,
    Microsoft,
    Fastmail,
    Proton,
    Rambler,
    Yahoo,
    Yandex,
}

impl Provider {
    fn from_domain(domain: &str) -> Option<Self> {
        let provider = match domain {
            "gmail.com" | "googlemail.com" => Self::Google,
            "icloud.com" | "me.com" | "mac.com" => Self::Apple,
            "outlook.com" | "hotmail.com" | "live.com" | "msn.com" => Self::Microsoft,
            "fastmail.com" | "fastmail.fm" | "messagingengine.com" => Self::Fastmail,
            "protonmail.com" | "protonmail.ch" | "proton.me" | "pm.me" => Self::Proton,
            "rambler.ru" | "lenta.ru" | "autorambler.ru" | "myrambler.ru" | "ro.ru" => {
                Self::Rambler
            }
            "yahoo.com" | "ymail.com" | "rocketmail.com" | "yahoo.co.uk" | "yahoo.fr" => {
                Self::Yahoo
            }
            "yandex.ru" | "yandex.com" | "yandex.by" | "yandex.kz" | "yandex.ua" | "ya.ru"
            | "narod.ru" => Self::Yandex,
            _ => return None,
        };

        Some(provider)
    }

    fn canonicalize(self, local: &str, domain: &str) -> (String, String) {
        match self {
            Self::Google => (
                strip_tag(local, '+').replace('.', ""),
                "gmail.com".to_string(),
            ),
            Self::Apple | Self::Microsoft | Self::Fastmail | Self::Proton | Self::Rambler => {
                (strip_tag(local, '+').to_string(), domain.to_string())
            }
            Self::Yahoo => (strip_tag(local, '-').to_string(), domain.to_string()),
            Self::Yandex => (
                strip_tag(local, '+').replace('.', "-"),
                "yandex.ru".to_string(),
            ),
        }
    }
}

fn strip_tag(local: &str, separator: char) -> &str {
    local
        .split_once(separator)
        .map_or(local, |(mailbox, _tag)| mailbox)
}

/// Returns the canonical form of an email address.
///
/// The address is trimmed and lower-cased, then rewritten according to the
/// rules of well-known mailbox providers (sub-address tags are dropped, Gmail
/// ignores dots, and so on). Addresses without an `@` are only lower-cased.
/// A rule that would leave the local part empty is not applied.
pub fn normalize(address: &str) -> String {
    let lowered = address.trim().to_lowercase();

    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return lowered;
    };

    let Some(provider) = Provider::from_domain(domain) else {
        return lowered;
    };

    let (local, domain) = provider.canonicalize(local, domain);

    if local.is_empty() {
        return lowered;
    }

    format!("{local}@{domain}")
}
