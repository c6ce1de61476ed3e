//! Reply email formatting
//!
//! Pure functions rendering a forward package into the plain-text summary
//! email that goes back to the original sender.

use domain::ForwardPackage;

/// Render the body of the forwarded summary email
#[must_use]
pub fn format_forward_email(package: &ForwardPackage, primary_link: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push("💡 Here's what I found in your email:".to_string());
    parts.push(String::new());

    parts.push("📋 Key points".to_string());
    for point in &package.key_points {
        parts.push(format!("- {point}"));
    }

    if !package.links.is_empty() {
        parts.push(String::new());
        parts.push("🔗 Links".to_string());
        for link in &package.links {
            parts.push(format!("- {}: {}", link.label, link.url));
        }
    }

    if let Some(url) = primary_link {
        parts.push(String::new());
        parts.push("✅ Action".to_string());
        parts.push(format!("- Quick link: {url}"));
    }

    if package.has_calendar_event {
        parts.push(String::new());
        parts.push("📅 Calendar".to_string());
        parts.push("- Invite attached (event.ics)".to_string());
    }

    parts.push(String::new());
    parts.push("—".to_string());
    parts.push("🧭 Mailsift Assistant".to_string());
    parts.push("Your AI-powered inbox helper".to_string());

    parts.join("\n")
}
