//! Placeholder resolution.
//!
//! Substitutes a variable set into a template body in a single left-to-right
//! pass. Every `{{name}}` occurrence is replaced identically:
//!
//! 1. the set's value, when present and non-empty
//! 2. otherwise the declared default, when one exists
//! 3. otherwise the empty string, when the name is declared or present
//!    (empty) in the set
//! 4. otherwise the token is left verbatim, so unknown placeholders surface
//!    downstream instead of vanishing silently
//!
//! Resolution never fails and is idempotent for a fixed (template, set) pair
//! as long as substituted values contain no placeholder tokens themselves.

use super::{Template, PLACEHOLDER_REGEX};
use crate::varset::VariableSet;
use regex::Captures;

/// Resolve a template body against one variable set.
///
/// The caller is expected to have validated the set (or to rely on declared
/// defaults); resolution itself substitutes whatever it can and leaves
/// unknown tokens in place.
pub fn resolve(template: &Template, set: &VariableSet) -> String {
    PLACEHOLDER_REGEX
        .replace_all(&template.body, |caps: &Captures| {
            let token = &caps[0];
            let name = caps[1].trim();
            if name.is_empty() {
                // Malformed token, pass through untouched.
                return token.to_string();
            }

            match set.get(name) {
                Some(value) if !value.is_empty() => value.to_string(),
                present => match template.default_for(name) {
                    Some(default) => default.to_string(),
                    None if template.is_declared(name) || present.is_some() => String::new(),
                    None => token.to_string(),
                },
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateVariable;

    #[test]
    fn substitutes_values() {
        let template = Template::from_body("greeting", "Hello {{name}}, you are {{age}}");
        let set = VariableSet::from_pairs([("name", "John"), ("age", "30")]);

        assert_eq!(resolve(&template, &set), "Hello John, you are 30");
    }

    #[test]
    fn replaces_all_occurrences_identically() {
        let template = Template::from_body("echo", "{{x}}-{{x}}-{{x}}");
        let set = VariableSet::from_pairs([("x", "X")]);

        assert_eq!(resolve(&template, &set), "X-X-X");
    }

    #[test]
    fn trims_whitespace_inside_braces() {
        let template = Template::from_body("spaced", "Hello {{ name }}!");
        let set = VariableSet::from_pairs([("name", "Alice")]);

        assert_eq!(resolve(&template, &set), "Hello Alice!");
    }

    #[test]
    fn absent_declared_variable_uses_default() {
        let template = Template::with_variables(
            "greeting",
            "Hello {{name}}, you are {{age}}",
            vec![
                TemplateVariable::required("name"),
                TemplateVariable::with_default("age", "30"),
            ],
        )
        .unwrap();
        let set = VariableSet::from_pairs([("name", "Jane")]);

        assert_eq!(resolve(&template, &set), "Hello Jane, you are 30");
    }

    #[test]
    fn empty_value_also_triggers_default() {
        // An empty-string value and an absent value are equivalent triggers.
        let template = Template::with_variables(
            "greeting",
            "age: {{age}}",
            vec![TemplateVariable::with_default("age", "30")],
        )
        .unwrap();
        let set = VariableSet::from_pairs([("age", "")]);

        assert_eq!(resolve(&template, &set), "age: 30");
    }

    #[test]
    fn absent_declared_variable_without_default_becomes_empty() {
        let template = Template::with_variables(
            "greeting",
            "Hello {{name}}!",
            vec![TemplateVariable::required("name")],
        )
        .unwrap();

        assert_eq!(resolve(&template, &VariableSet::new()), "Hello !");
    }

    #[test]
    fn unknown_placeholder_is_left_verbatim() {
        let template = Template::with_variables(
            "greeting",
            "Hello {{name}}, {{typo}}!",
            vec![TemplateVariable::required("name")],
        )
        .unwrap();
        let set = VariableSet::from_pairs([("name", "John")]);

        assert_eq!(resolve(&template, &set), "Hello John, {{typo}}!");
    }

    #[test]
    fn undeclared_but_supplied_name_is_replaced() {
        // Extra keys are ignored by validation but still usable here.
        let template = Template::with_variables("free", "{{extra}}", Vec::new()).unwrap();
        let set = VariableSet::from_pairs([("extra", "value")]);

        assert_eq!(resolve(&template, &set), "value");
    }

    #[test]
    fn malformed_tokens_pass_through() {
        let template = Template::from_body("odd", "{{}} {{ }} {{open and }close}");
        let set = VariableSet::from_pairs([("open", "X")]);

        assert_eq!(resolve(&template, &set), "{{}} {{ }} {{open and }close}");
    }

    #[test]
    fn single_braces_are_preserved() {
        let template = Template::from_body("code", "if (x) { return {{y}}; }");
        let set = VariableSet::from_pairs([("y", "42")]);

        assert_eq!(resolve(&template, &set), "if (x) { return 42; }");
    }

    #[test]
    fn resolution_is_idempotent() {
        let template = Template::from_body("greeting", "Hello {{name}}, you are {{age}}");
        let set = VariableSet::from_pairs([("name", "John"), ("age", "30")]);

        let first = resolve(&template, &set);
        let second = resolve(&template, &set);
        assert_eq!(first, second);
    }

    #[test]
    fn multiline_bodies_resolve() {
        let template = Template::from_body("doc", "# {{title}}\n\n{{content}}\n");
        let set = VariableSet::from_pairs([("title", "Report"), ("content", "line1\nline2")]);

        assert_eq!(resolve(&template, &set), "# Report\n\nline1\nline2\n");
    }

    #[test]
    fn values_containing_commas_and_quotes() {
        let template = Template::from_body("csvish", "{{field}}");
        let set = VariableSet::from_pairs([("field", "a,\"b\",c")]);

        assert_eq!(resolve(&template, &set), "a,\"b\",c");
    }
}
