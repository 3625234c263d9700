pub mod job;
pub mod sweep;

/// Joins an argument vector into one line a POSIX shell reads back unchanged.
pub fn shell_join(command: &[String]) -> String {
    command
        .iter()
        .map(|token| shell_quote(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "-_./:=,@%+".contains(ch));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::shell_join;

    #[test]
    fn quotes_only_what_needs_quoting() {
        let command = vec![
            "hadoop".to_string(),
            "-D".to_string(),
            "mapreduce.job.maps=4".to_string(),
            "it's here".to_string(),
            String::new(),
        ];
        assert_eq!(
            shell_join(&command),
            r"hadoop -D mapreduce.job.maps=4 'it'\''s here' ''"
        );
    }
}
