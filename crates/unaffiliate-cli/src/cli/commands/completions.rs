//! `unaffiliate completions <shell>` and `unaffiliate man`.

use anyhow::Result;
use clap_complete::Shell;

pub fn run_completions(shell: Shell, mut cmd: clap::Command) -> Result<()> {
    clap_complete::generate(shell, &mut cmd, "unaffiliate", &mut std::io::stdout());
    Ok(())
}

pub fn run_man(cmd: clap::Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut std::io::stdout())?;
    Ok(())
}
