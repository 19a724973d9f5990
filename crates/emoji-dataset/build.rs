use clap::CommandFactory;
use clap_complete::{generate_to, shells};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io::Result;
use std::path::PathBuf;

#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    println!("cargo:rerun-if-changed=src/cli.rs");

    let mut cmd = cli::EmojiFetchArgs::command();
    let bin_name = "emoji-fetch";

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    let mut man_buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut man_buffer)?;
    fs::write(man_dir.join(format!("{}.1", bin_name)), man_buffer)?;

    let comp_dir = out_dir.join("completions");
    fs::create_dir_all(&comp_dir)?;
    generate_to(shells::Bash, &mut cmd, bin_name, &comp_dir)?;
    generate_to(shells::Fish, &mut cmd, bin_name, &comp_dir)?;
    generate_to(shells::Zsh, &mut cmd, bin_name, &comp_dir)?;

    Ok(())
}
