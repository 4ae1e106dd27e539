use clap::{Args, ValueEnum};

use crate::utils_ext::case::{from_dash_case, to_camel_case, to_dash_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseStyle {
    /// `paper button` -> `paper-button`
    Dash,
    /// `paper-button` -> `paperButton`
    Camel,
    /// `paper-button` -> `Paper Button`
    Title,
}

#[derive(Debug, Args)]
pub struct CaseCommand {
    /// Target style
    #[arg(long, value_enum)]
    pub to: CaseStyle,
    /// Text to convert; multiple words are joined with spaces
    #[arg(required = true)]
    pub text: Vec<String>,
}

impl CaseCommand {
    pub fn convert(&self) -> String {
        let text = self.text.join(" ");
        match self.to {
            CaseStyle::Dash => to_dash_case(&text),
            CaseStyle::Camel => to_camel_case(&text),
            CaseStyle::Title => from_dash_case(&text),
        }
    }

    pub fn run(&self) {
        println!("{}", self.convert());
    }
}
