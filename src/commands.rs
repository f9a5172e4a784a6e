/// How configured commands are compared against comment text.
///
/// The comment is always lower-cased before matching. With [`CommandCase::Verbatim`] the
/// configured commands are used as written, so a command containing upper case letters never
/// matches anything. That is how deployments have behaved so far, so it stays the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum CommandCase {
    #[default]
    Verbatim,
    /// Lower-case the configured commands as well
    Insensitive,
}

/// Pull request comments that may trigger a build: those starting with an allowed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommandFilter {
    commands: Vec<String>,
    case: CommandCase,
}

impl CommandFilter {
    /// Parse a comma separated list of commands, e.g. `retest,rebuild`.
    pub(crate) fn new(allowed: &str, case: CommandCase) -> Self {
        let commands = allowed
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| match case {
                CommandCase::Verbatim => c.to_owned(),
                CommandCase::Insensitive => c.to_lowercase(),
            })
            .collect();
        CommandFilter { commands, case }
    }

    pub(crate) fn case(&self) -> CommandCase {
        self.case
    }

    pub(crate) fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Whether `comment` starts with one of the allowed commands.
    pub(crate) fn allows(&self, comment: &str) -> bool {
        let comment = comment.to_lowercase();
        self.commands.iter().any(|c| comment.starts_with(c.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("retest,rebuild", "Retest please", true)]
    #[case("retest,rebuild", "REBUILD", true)]
    #[case("retest,rebuild", "lgtm", false)]
    #[case("retest,rebuild", "please retest", false)]
    #[case("retest, rebuild", "rebuild now", true)]
    #[case("", "retest", false)]
    #[case(",", "retest", false)]
    #[case("retest", "", false)]
    fn test_allows(#[case] allowed: &str, #[case] comment: &str, #[case] expected: bool) {
        for case in [CommandCase::Verbatim, CommandCase::Insensitive] {
            let filter = CommandFilter::new(allowed, case);
            assert_eq!(filter.allows(comment), expected, "{case:?}");
        }
    }

    #[test]
    fn test_verbatim_commands_keep_case() {
        let filter = CommandFilter::new("Retest", CommandCase::Verbatim);
        assert_eq!(filter.commands(), ["Retest"]);
        // the comment is folded, the command is not
        assert!(!filter.allows("Retest please"));
        assert!(!filter.allows("retest please"));
    }

    #[test]
    fn test_insensitive_commands_folded() {
        let filter = CommandFilter::new("Retest", CommandCase::Insensitive);
        assert_eq!(filter.commands(), ["retest"]);
        assert!(filter.allows("Retest please"));
        assert!(filter.allows("RETEST"));
    }

    #[test]
    fn test_default_is_verbatim_and_empty() {
        let filter = CommandFilter::default();
        assert_eq!(filter.case(), CommandCase::Verbatim);
        assert!(!filter.allows("retest"));
    }
}
