use clap::{Arg, ArgAction, Command, ValueHint};
use dda_fix::input::Settings;
use dda_fix::runner::Runner;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DDA_FIX_LOG", "error,dda_fix=info"))
        .init();

    let matches = Command::new("dda-fix")
        .version(clap::crate_version!())
        .about(
            "Removes useless columns from `evidence.txt` and `msms.txt` DDA files \
             to use for DIA in MaxQuant.",
        )
        .arg(
            Arg::new("evidence")
                .short('e')
                .long("evidence")
                .default_value("evidence.txt")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("`evidence.txt` file from a MaxQuant DDA analysis")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("msms")
                .short('m')
                .long("msms")
                .default_value("msms.txt")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("`msms.txt` file from a MaxQuant DDA analysis")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("out-evidence")
                .short('E')
                .long("out-evidence")
                .default_value("evidence-fix.txt")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Output for the fixed `evidence.txt` file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("out-msms")
                .short('M')
                .long("out-msms")
                .default_value("msms-fix.txt")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Output for the fixed `msms.txt` file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("remove")
                .short('r')
                .long("remove")
                .action(ArgAction::Append)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Remove MS/MS spectra assigned to evidence carrying this \
                     modification, e.g. `(ox)`. May be given multiple times.",
                )
                .value_hint(ValueHint::Other),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let settings = Settings::from_arguments(&matches);
    Runner::new(settings).run()
}
