//! Time-of-day greeting for the dashboard.

/// A two-line greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub title: String,
    pub subtitle: String,
}

/// Build the greeting for a given local hour (0-23) and optional name.
/// The name's first letter is capitalized for display.
pub fn greeting(name: Option<&str>, hour: u32) -> Greeting {
    let display_name = name
        .filter(|n| !n.is_empty())
        .map(|n| {
            let mut chars = n.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .map(|n| format!(", {n}"))
        .unwrap_or_default();

    match hour {
        5..=11 => Greeting {
            title: format!("Good morning{display_name}!"),
            subtitle: "What's the plan for today? Let's get it organized.".to_string(),
        },
        12..=16 => Greeting {
            title: format!("Good afternoon{display_name}!"),
            subtitle: "Keep the momentum going. You've got this.".to_string(),
        },
        17..=20 => Greeting {
            title: format!("Good evening{display_name}."),
            subtitle: "Time to wrap up the day or plan for tomorrow?".to_string(),
        },
        _ => Greeting {
            title: format!("Burning the midnight oil{display_name}?"),
            subtitle: "Late night focus session. Let's make it productive.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_part_boundaries() {
        assert!(greeting(None, 5).title.starts_with("Good morning"));
        assert!(greeting(None, 11).title.starts_with("Good morning"));
        assert!(greeting(None, 12).title.starts_with("Good afternoon"));
        assert!(greeting(None, 16).title.starts_with("Good afternoon"));
        assert!(greeting(None, 17).title.starts_with("Good evening"));
        assert!(greeting(None, 20).title.starts_with("Good evening"));
        assert!(greeting(None, 21).title.starts_with("Burning the midnight oil"));
        assert!(greeting(None, 4).title.starts_with("Burning the midnight oil"));
    }

    #[test]
    fn name_is_capitalized() {
        let g = greeting(Some("sam"), 9);
        assert_eq!(g.title, "Good morning, Sam!");
    }

    #[test]
    fn missing_name_omits_comma() {
        let g = greeting(None, 9);
        assert_eq!(g.title, "Good morning!");
        let g = greeting(Some(""), 9);
        assert_eq!(g.title, "Good morning!");
    }
}
