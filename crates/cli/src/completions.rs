use crate::args::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

pub fn generate_to(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "safeher", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let mut out = Vec::new();
        generate_to(Shell::Bash, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("safeher"));
        assert!(script.contains("assess"));
        assert!(script.contains("strip"));
    }
}
