//! Property-based tests for template post-processing.
//!
//! These tests use proptest to generate random env files and module names
//! and verify that only the targeted lines change.

#[cfg(test)]
mod proptest_tests {
    use crate::template::{rewrite_module_declaration, substitute_env};
    use proptest::prelude::*;

    // ============================================================================
    // substitute_env property tests
    // ============================================================================

    proptest! {
        /// Property: content without the placeholders is returned unchanged
        #[test]
        fn substitute_env_leaves_unrelated_content_alone(
            content in "[A-Z_]{1,8}=[a-z0-9]{0,8}(\n[A-Z_]{1,8}=[a-z0-9]{0,8}){0,6}\n?",
            name in "[a-z][a-z0-9-]{0,15}",
        ) {
            prop_assume!(!content.contains("APP_NAME=Goravel"));
            prop_assume!(!content.contains("APP_URL=http://localhost"));
            prop_assert_eq!(substitute_env(&content, &name), content);
        }

        /// Property: lines around the substituted pairs keep their bytes
        #[test]
        fn substitute_env_preserves_surrounding_lines(
            before in "(DB_[A-Z]{1,6}=[a-z0-9]{0,6}\n){0,4}",
            after in "(CACHE_[A-Z]{1,6}=[a-z0-9]{0,6}\n){0,4}",
            name in "[a-z][a-z0-9-]{0,15}",
        ) {
            let content = format!("{}APP_NAME=Goravel\nAPP_URL=http://localhost\n{}", before, after);
            let expected = format!(
                "{}APP_NAME={}\nAPP_URL=http://localhost:3000\n{}",
                before, name, after
            );
            prop_assert_eq!(substitute_env(&content, &name), expected);
        }

        /// Property: substitution is deterministic
        #[test]
        fn substitute_env_is_deterministic(content in ".*", name in ".*") {
            prop_assert_eq!(substitute_env(&content, &name), substitute_env(&content, &name));
        }
    }

    // ============================================================================
    // rewrite_module_declaration property tests
    // ============================================================================

    proptest! {
        /// Property: only the first line changes
        #[test]
        fn rewrite_module_keeps_remaining_lines(
            old in "[a-z][a-z0-9./-]{0,20}",
            name in "[a-z][a-z0-9-]{0,15}",
            rest in "(go 1\\.[0-9]{2}\n|require [a-z./]{1,10} v[0-9]\\.[0-9]\\.[0-9]\n){0,5}",
        ) {
            let content = format!("module {}\n{}", old, rest);
            let rewritten = rewrite_module_declaration(&content, &name);
            prop_assert_eq!(rewritten, Some(format!("module {}\n{}", name, rest)));
        }

        /// Property: files not starting with a module line are rejected
        #[test]
        fn rewrite_module_rejects_other_first_lines(
            first in "(go|require|// [a-z]{0,8})",
            name in "[a-z][a-z0-9-]{0,15}",
        ) {
            let content = format!("{}\nmodule other\n", first);
            prop_assert_eq!(rewrite_module_declaration(&content, &name), None);
        }
    }
}
