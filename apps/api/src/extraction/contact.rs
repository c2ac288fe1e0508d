//! Contact-field extraction (name, email, phone) and client-name mining
//! from raw resume text, all regex heuristics.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::document::ContactInfo;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap())
}

/// Phone patterns, tried in order: US-style, 5+5/6 digit, generic
/// international groupings.
fn phone_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
            r"(?:\+\d{1,3}[-.\s]?)?\d{5}[-.\s]?\d{5,6}",
            r"(?:\+\d{1,3}[-.\s]?)?\d{2,4}[-.\s]?\d{2,4}[-.\s]?\d{2,4}[-.\s]?\d{2,4}",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Name heuristics: a capitalized header line, an ALL-CAPS header line,
/// or an explicit `Name:` prefix.
fn name_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?m)^([A-Z][a-z]+(?:\s[A-Z][a-z]+){1,3})\s*$",
            r"(?m)^([A-Z]+\s+[A-Z]+(?:\s+[A-Z]+)?)\s*$",
            r"(?:Name|NAME):\s*([A-Z][a-z]+(?:\s[A-Z][a-z]+){1,3})",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn client_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^\s*Client\s*:\s*([^\r\n]+)").unwrap())
}

/// Extracts name/email/phone from resume text. Fields that cannot be found
/// stay `None`; the caller falls back to the filename for display.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let email = email_re()
        .find(text)
        .map(|m| m.as_str().trim().to_string());

    let phone = phone_res()
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string());

    let name = name_res().iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    });

    ContactInfo { name, email, phone }
}

/// Mines `Client: <name>` lines. Generic words are rejected and duplicates
/// collapsed, preserving first-seen order.
pub fn extract_clients(text: &str) -> Vec<String> {
    let mut clients: Vec<String> = Vec::new();
    for captures in client_re().captures_iter(text) {
        let Some(m) = captures.get(1) else { continue };
        let client = m.as_str().trim().to_string();
        let lower = client.to_lowercase();
        if client.len() <= 2 || matches!(lower.as_str(), "client" | "customer" | "account") {
            continue;
        }
        if !clients.contains(&client) {
            clients.push(client);
        }
    }
    clients
}
