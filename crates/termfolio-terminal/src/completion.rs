//! Prefix-based tab completion over the command token list.

/// Token inserted when completing an empty buffer.
const EMPTY_COMPLETION: &str = "help";

/// Complete the command word of `buffer` against `tokens`.
///
/// Returns the new buffer, or `None` when completion changes nothing
/// (no match, or an ambiguous prefix no longer than what was typed).
/// Anything after the first space is carried over untouched.
pub fn complete<S: AsRef<str>>(buffer: &str, tokens: &[S]) -> Option<String> {
    if buffer.trim().is_empty() {
        return Some(EMPTY_COMPLETION.to_string());
    }

    let trimmed = buffer.trim_start();
    let (typed, remainder) = match trimmed.split_once(' ') {
        Some((cmd, rest)) => (cmd, Some(rest)),
        None => (trimmed, None),
    };
    let typed_lower = typed.to_lowercase();

    let matches: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| t.to_lowercase().starts_with(&typed_lower))
        .collect();

    let completed = match matches.as_slice() {
        [] => return None,
        [only] => (*only).to_string(),
        many => {
            let prefix = longest_common_prefix(many);
            if prefix.chars().count() <= typed.chars().count() {
                return None;
            }
            prefix.to_string()
        },
    };

    Some(match remainder {
        Some(rest) if !rest.is_empty() => format!("{completed} {rest}"),
        _ => completed,
    })
}

/// Longest prefix shared by every string. Empty for an empty slice.
///
/// Shrinks a running prefix against each string in turn, so the cost is
/// bounded by the total length of the input.
pub fn longest_common_prefix<'a>(items: &[&'a str]) -> &'a str {
    let Some((&first, rest)) = items.split_first() else {
        return "";
    };
    let mut prefix = first;
    for s in rest {
        let shared: usize = prefix
            .char_indices()
            .zip(s.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0);
        prefix = &prefix[..shared];
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOKENS: &[&str] = &[
        "about", "clear", "cls", "contact", "date", "echo", "email", "exit", "h", "help",
        "history", "logout", "ls", "man", "projects", "pwd", "skill", "skills", "theme",
        "uptime", "whoami",
    ];

    #[test]
    fn empty_buffer_completes_to_help() {
        assert_eq!(complete("", TOKENS).as_deref(), Some("help"));
        assert_eq!(complete("   ", TOKENS).as_deref(), Some("help"));
    }

    #[test]
    fn single_match_completes() {
        assert_eq!(complete("pro", TOKENS).as_deref(), Some("projects"));
        assert_eq!(complete("PRO", TOKENS).as_deref(), Some("projects"));
    }

    #[test]
    fn single_match_keeps_remainder() {
        assert_eq!(complete("th amber", TOKENS).as_deref(), Some("theme amber"));
        assert_eq!(
            complete("ma AI chatbot", TOKENS).as_deref(),
            Some("man AI chatbot")
        );
    }

    #[test]
    fn ambiguous_prefix_not_longer_is_no_change() {
        // h, help, history: common prefix "h" equals what was typed.
        assert_eq!(complete("h", TOKENS), None);
    }

    #[test]
    fn ambiguous_prefix_extends() {
        // skill, skills
        assert_eq!(complete("sk", TOKENS).as_deref(), Some("skill"));
        // clear, cls
        assert_eq!(complete("c", &["clear", "cls"]).as_deref(), Some("cl"));
        assert_eq!(complete("he", &["help", "hello"]).as_deref(), Some("hel"));
    }

    #[test]
    fn ambiguous_prefix_extends_with_remainder() {
        assert_eq!(
            complete("he x y", &["help", "hello"]).as_deref(),
            Some("hel x y")
        );
    }

    #[test]
    fn zero_matches_is_no_change() {
        assert_eq!(complete("zzz", TOKENS), None);
        assert_eq!(complete("zzz arg", TOKENS), None);
    }

    #[test]
    fn complete_exact_token_is_idempotent() {
        assert_eq!(complete("whoami", TOKENS).as_deref(), Some("whoami"));
    }

    #[test]
    fn lcp_basics() {
        assert_eq!(longest_common_prefix(&[]), "");
        assert_eq!(longest_common_prefix(&["alone"]), "alone");
        assert_eq!(longest_common_prefix(&["help", "history", "h"]), "h");
        assert_eq!(longest_common_prefix(&["abc", "xyz"]), "");
        assert_eq!(longest_common_prefix(&["héllo", "hélp"]), "hél");
    }

    proptest! {
        #[test]
        fn lcp_is_prefix_of_all(items in proptest::collection::vec("[a-c]{0,6}", 1..6)) {
            let refs: Vec<&str> = items.iter().map(String::as_str).collect();
            let p = longest_common_prefix(&refs);
            for s in &refs {
                prop_assert!(s.starts_with(p));
            }
        }

        #[test]
        fn lcp_is_maximal(items in proptest::collection::vec("[a-c]{1,6}", 2..6)) {
            let refs: Vec<&str> = items.iter().map(String::as_str).collect();
            let p = longest_common_prefix(&refs);
            let min_len = refs.iter().map(|s| s.len()).min().unwrap();
            if p.len() < min_len {
                let next = refs[0].as_bytes()[p.len()];
                prop_assert!(refs.iter().any(|s| s.as_bytes()[p.len()] != next));
            }
        }

        #[test]
        fn completion_result_starts_with_a_token(typed in "[a-z]{1,4}") {
            if let Some(out) = complete(&typed, TOKENS) {
                let cmd = out.split(' ').next().unwrap();
                prop_assert!(TOKENS.iter().any(|t| t.starts_with(cmd)));
                prop_assert!(cmd.len() > typed.len() || TOKENS.contains(&cmd));
            }
        }
    }
}
