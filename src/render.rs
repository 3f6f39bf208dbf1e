use crate::config::Config;
use crate::model::Donor;
use crate::reveal::{LoadStatus, VisibleList};
use crate::session::{Display, Session};
use std::time::Instant;

pub const NO_MATCHES: &str = "No donors match this search.";
pub const DATA_UNAVAILABLE: &str = "Donor data unavailable.";
pub const EMPTY_PODIUM: &str = "No donors to show yet.";

pub fn format_money(amount: u64, config: &Config) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + config.currency_suffix.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(&config.thousands_separator);
        }
        out.push(ch);
    }
    out.push_str(&config.currency_suffix);
    out
}

pub fn medal(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// Avatar fallback letter.
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

pub fn render_card(donor: &Donor, is_top: bool, config: &Config) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut head = format!("[{}] ", initial(&donor.name));
    if is_top {
        if let Some(m) = medal(donor.rank) {
            head.push_str(m);
            head.push(' ');
        }
    }
    head.push_str(&donor.name);
    parts.push(head);
    parts.push(format!("Top #{}", donor.rank));
    parts.push(format_money(donor.amount, config));

    if !donor.date.is_empty() {
        parts.push(donor.date.clone());
    }
    if let Some(social) = &donor.social {
        let mut s = if social.uid.is_empty() {
            social.platform.clone()
        } else if social.platform.is_empty() {
            format!("@{}", social.uid)
        } else {
            format!("@{} ({})", social.uid, social.platform)
        };
        if !social.url.is_empty() {
            s.push_str(&format!(" <{}>", social.url));
        }
        parts.push(s);
    }
    parts.join(" · ")
}

pub fn status_lines(status: LoadStatus) -> Vec<String> {
    let mut lines = vec![format!("{} results", status.total)];
    if !status.is_empty() {
        lines.push(format!("Shown {} / {}", status.shown, status.total));
    }
    if status.load_more_visible() {
        lines.push("[load more]".to_string());
    }
    lines
}

pub fn render_session(session: &Session<VisibleList>, now: Instant) -> String {
    let config = session.config();
    let mut lines: Vec<String> = Vec::new();

    match session.display() {
        Display::Loading => {
            lines.push("Loading…".to_string());
        }
        Display::Failed(_) => {
            lines.push(format!("Total: {}", format_money(0, config)));
            lines.push("Supporters: 0".to_string());
            lines.push(String::new());
            lines.push(DATA_UNAVAILABLE.to_string());
            lines.push("0 results".to_string());
        }
        display => {
            let totals = session.totals();
            lines.push(format!("Total: {}", format_money(session.displayed_total(now), config)));
            lines.push(format!("Supporters: {}", totals.count));
            lines.push(String::new());

            let podium = session.podium();
            if podium.is_empty() {
                lines.push(EMPTY_PODIUM.to_string());
            } else {
                for donor in podium {
                    lines.push(render_card(donor, true, config));
                }
            }
            lines.push(String::new());

            if display == Display::NoMatches {
                lines.push(NO_MATCHES.to_string());
            } else {
                for donor in &session.output().items {
                    lines.push(render_card(donor, false, config));
                }
            }
            lines.push(String::new());
            lines.extend(status_lines(session.status()));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SocialIdentity;

    fn donor(rank: usize) -> Donor {
        Donor {
            name: "An".into(),
            amount: 1_500_000,
            avatar: String::new(),
            is_anonymous: false,
            social: Some(SocialIdentity {
                platform: "tiktok".into(),
                uid: "an".into(),
                username: "@an".into(),
                url: "https://www.tiktok.com/@an".into(),
            }),
            rank,
            date: "01/02/2024".into(),
        }
    }

    #[test]
    fn test_format_money() {
        let config = Config::default();
        assert_eq!(format_money(0, &config), "0đ");
        assert_eq!(format_money(999, &config), "999đ");
        assert_eq!(format_money(1000, &config), "1.000đ");
        assert_eq!(format_money(1_234_567, &config), "1.234.567đ");
    }

    #[test]
    fn test_format_money_custom() {
        let config = Config {
            currency_suffix: " VND".into(),
            thousands_separator: ",".into(),
            ..Config::default()
        };
        assert_eq!(format_money(100_000, &config), "100,000 VND");
    }

    #[test]
    fn test_medals() {
        assert_eq!(medal(1), Some("🥇"));
        assert_eq!(medal(3), Some("🥉"));
        assert_eq!(medal(4), None);
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("đỗ"), "Đ");
        assert_eq!(initial(""), "");
    }

    #[test]
    fn test_card() {
        let config = Config::default();
        assert_eq!(
            render_card(&donor(1), true, &config),
            "[A] 🥇 An · Top #1 · 1.500.000đ · 01/02/2024 · @an (tiktok) <https://www.tiktok.com/@an>"
        );
        assert_eq!(
            render_card(&donor(1), false, &config),
            "[A] An · Top #1 · 1.500.000đ · 01/02/2024 · @an (tiktok) <https://www.tiktok.com/@an>"
        );
    }

    #[test]
    fn test_card_platform_only() {
        let mut d = donor(7);
        d.date.clear();
        d.social = Some(SocialIdentity {
            platform: "threads".into(),
            uid: String::new(),
            username: String::new(),
            url: String::new(),
        });
        assert_eq!(render_card(&d, true, &Config::default()), "[A] An · Top #7 · 1.500.000đ · threads");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(status_lines(LoadStatus { total: 0, shown: 0 }), vec!["0 results"]);
        assert_eq!(
            status_lines(LoadStatus { total: 5, shown: 2 }),
            vec!["5 results", "Shown 2 / 5", "[load more]"]
        );
        assert_eq!(
            status_lines(LoadStatus { total: 5, shown: 5 }),
            vec!["5 results", "Shown 5 / 5"]
        );
    }
}
