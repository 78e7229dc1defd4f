// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// pairdiv - Per-specimen nucleotide divergence from paired sequences
pub struct Args {
    /// input FASTA file with two sequences per specimen
    #[argh(option, short = 'i')]
    pub input: Option<String>,

    /// output table (default: <input name up to first dot>_divergence_table.csv)
    #[argh(option, short = 'o')]
    pub output: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// scoring preset: default, edit (default: default)
    #[argh(option, default = "String::from(\"default\")")]
    pub scoring: String,

    /// custom match score (overrides preset)
    #[argh(option)]
    pub match_score: Option<f64>,

    /// custom mismatch score (overrides preset)
    #[argh(option)]
    pub mismatch_score: Option<f64>,

    /// custom gap open score, zero or negative (overrides preset)
    #[argh(option)]
    pub gap_open: Option<f64>,

    /// custom gap extend score, zero or negative (overrides preset)
    #[argh(option)]
    pub gap_extend: Option<f64>,

    /// maximum DP cells per alignment, 0 = unlimited (default: 0)
    #[argh(option, default = "0")]
    pub max_cells: usize,

    /// include only specimens matching regex pattern
    #[argh(option)]
    pub include_specimens: Option<String>,

    /// exclude specimens matching regex pattern
    #[argh(option)]
    pub exclude_specimens: Option<String>,

    /// save aligned sequences to file (TSV format)
    #[argh(option)]
    pub save_alignments: Option<String>,

    /// write a JSON run summary to file
    #[argh(option)]
    pub summary: Option<String>,

    /// validate inputs and report group sizes without aligning
    #[argh(switch)]
    pub dry_run: bool,

    /// hide the progress bar
    #[argh(switch)]
    pub quiet: bool,

    /// log every specimen result (debug level)
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
