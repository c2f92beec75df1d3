/// Host permission match patterns (`<scheme>://<host><path>`)

use crate::error::PatternError;
use std::fmt;
use url::Url;

const ALL_URLS_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp", "file", "data"];
const PATTERN_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp", "file"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeMatch {
    /// `*`: http or https
    Web,
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatch {
    Any,
    /// `*.example.com`: example.com and every subdomain
    Subdomains(String),
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPattern {
    AllUrls,
    Pattern {
        scheme: SchemeMatch,
        host: HostMatch,
        path: String,
    },
}

impl MatchPattern {
    pub fn parse(pattern: &str) -> Result<MatchPattern, PatternError> {
        // Bare `*` is the legacy spelling of <all_urls>
        if pattern == "<all_urls>" || pattern == "*" {
            return Ok(MatchPattern::AllUrls);
        }

        let (scheme, rest) = pattern
            .split_once("://")
            .ok_or_else(|| PatternError::MissingScheme(pattern.to_string()))?;

        let scheme = match scheme {
            "*" => SchemeMatch::Web,
            s if PATTERN_SCHEMES.contains(&s) => SchemeMatch::Exact(s.to_string()),
            s => return Err(PatternError::InvalidScheme(s.to_string())),
        };

        let path_start = rest
            .find('/')
            .ok_or_else(|| PatternError::MissingPath(pattern.to_string()))?;
        let (host, path) = rest.split_at(path_start);

        let host = parse_host(host, &scheme)?;

        Ok(MatchPattern::Pattern {
            scheme,
            host,
            path: path.to_string(),
        })
    }

    pub fn matches(&self, url: &Url) -> bool {
        match self {
            MatchPattern::AllUrls => ALL_URLS_SCHEMES.contains(&url.scheme()),
            MatchPattern::Pattern { scheme, host, path } => {
                let scheme_ok = match scheme {
                    SchemeMatch::Web => matches!(url.scheme(), "http" | "https"),
                    SchemeMatch::Exact(s) => url.scheme() == s,
                };

                let url_host = url.host_str().unwrap_or("");
                let host_ok = match host {
                    HostMatch::Any => true,
                    HostMatch::Exact(h) => url_host == h,
                    HostMatch::Subdomains(domain) => {
                        url_host == domain
                            || url_host
                                .strip_suffix(domain.as_str())
                                .is_some_and(|prefix| prefix.ends_with('.'))
                    }
                };

                let target = match url.query() {
                    Some(query) => format!("{}?{}", url.path(), query),
                    None => url.path().to_string(),
                };

                scheme_ok && host_ok && glob_match(path, &target)
            }
        }
    }

    /// Like [`matches`](Self::matches); an unparseable URL never matches
    pub fn matches_str(&self, url: &str) -> bool {
        Url::parse(url).map(|url| self.matches(&url)).unwrap_or(false)
    }
}

fn parse_host(host: &str, scheme: &SchemeMatch) -> Result<HostMatch, PatternError> {
    let invalid = || PatternError::InvalidHost(host.to_string());

    if host.is_empty() {
        return match scheme {
            SchemeMatch::Exact(s) if s == "file" => Ok(HostMatch::Any),
            _ => Err(invalid()),
        };
    }
    if host == "*" {
        return Ok(HostMatch::Any);
    }
    if host.contains(':') {
        return Err(invalid());
    }

    let (host_match, name) = match host.strip_prefix("*.") {
        Some(domain) => (HostMatch::Subdomains(domain.to_lowercase()), domain),
        None => (HostMatch::Exact(host.to_lowercase()), host),
    };
    if name.is_empty() || name.contains('*') {
        return Err(invalid());
    }

    Ok(host_match)
}

/// `*` matches any run of characters, everything else is literal
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.as_bytes();
    let text = text.as_bytes();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPattern::AllUrls => f.write_str("<all_urls>"),
            MatchPattern::Pattern { scheme, host, path } => {
                match scheme {
                    SchemeMatch::Web => f.write_str("*")?,
                    SchemeMatch::Exact(s) => f.write_str(s)?,
                }
                f.write_str("://")?;
                match host {
                    HostMatch::Any if matches!(scheme, SchemeMatch::Exact(s) if s == "file") => {}
                    HostMatch::Any => f.write_str("*")?,
                    HostMatch::Subdomains(domain) => write!(f, "*.{}", domain)?,
                    HostMatch::Exact(h) => f.write_str(h)?,
                }
                f.write_str(path)
            }
        }
    }
}
