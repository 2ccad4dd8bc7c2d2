use crate::cmd::read_input;
use clap::Args;
use reader::config::Config;
use reader::error::ReaderResult;
use reader::masking::mask_generation_line;
use reader::tokenizer::flow_text_into_lines;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct MaskArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub input: PathBuf,
}

pub fn run(args: &MaskArgs, config: &Config) -> ReaderResult<()> {
    let text = read_input(&args.input)?;
    let masking = &config.masking;

    for (line_index, line) in flow_text_into_lines(&text, config.flow.line_width)
        .iter()
        .enumerate()
    {
        if line.is_blank() {
            println!();
            continue;
        }
        println!(
            "{}",
            mask_generation_line(&line.text, masking.difficulty, masking.mask_seed, line_index)
        );
    }
    Ok(())
}
