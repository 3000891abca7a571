pub const CLASSIFY_SYSTEM: &str = include_str!("../data/prompts/classify_system.txt");
pub const CLASSIFY_USER: &str = include_str!("../data/prompts/classify_user.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} and {{b}}", &[("a", "cans")]), "cans and {{b}}");
    }

    #[test]
    fn test_classify_user_has_description_placeholder() {
        assert!(CLASSIFY_USER.contains("{{description}}"));
        assert_eq!(
            render(CLASSIFY_USER, &[("description", "banana peel")]),
            "Classify this waste item: 'banana peel'"
        );
    }

    #[test]
    fn test_system_prompt_lists_every_field() {
        for field in [
            "itemType",
            "bin",
            "confidence",
            "tips",
            "certainty",
            "autoDescription",
            "categories",
            "reasoning",
        ] {
            assert!(CLASSIFY_SYSTEM.contains(field), "missing {}", field);
        }
        assert!(CLASSIFY_SYSTEM.contains("Hazardous|Compost|Recycle|Landfill"));
    }
}
