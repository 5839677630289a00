use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "matcher", version)]
#[command(about = "Resume ATS scoring and job matching", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Score a resume against a job description")]
    Match {
        #[arg(short, long, help = "Resume text file")]
        resume: PathBuf,

        #[arg(short, long, help = "Job description text file")]
        job: Option<PathBuf>,
    },

    #[command(about = "Run the full ATS quality analysis on a resume")]
    Analyze {
        #[arg(short, long, help = "Resume text file")]
        resume: PathBuf,

        #[arg(short, long, help = "Job description text file")]
        job: Option<PathBuf>,

        #[arg(long, help = "Original document name, used for the file-format check (defaults to the resume path)")]
        filename: Option<String>,
    },

    #[command(about = "Compare two resumes side by side")]
    Compare {
        #[arg(long, help = "First resume text file")]
        resume_a: PathBuf,

        #[arg(long, help = "Second resume text file")]
        resume_b: PathBuf,

        #[arg(short, long, help = "Job description text file")]
        job: Option<PathBuf>,
    },

    #[command(about = "Analyze up to 10 resumes and rank them")]
    Rank {
        #[arg(required = true, help = "Resume text files")]
        resumes: Vec<PathBuf>,

        #[arg(short, long, help = "Job description text file")]
        job: Option<PathBuf>,
    },

    #[command(about = "Show keyword suggestions for an industry")]
    Keywords {
        #[arg(help = "technology, marketing, finance, healthcare or sales")]
        industry: String,
    },

    #[command(about = "Find coding profiles in a resume and assess job readiness")]
    Profiles {
        #[arg(short, long, help = "Resume text file")]
        resume: PathBuf,

        #[arg(short, long, help = "JSON array of profile stats")]
        stats: Option<PathBuf>,

        #[arg(short, long, help = "entry_level, mid_level or senior_level (overrides config)")]
        level: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "matcher", "compare", "--resume-a", "a.txt", "--resume-b", "b.txt", "--job", "jd.txt",
        ])
        .unwrap();
        let Commands::Compare { resume_a, resume_b, job } = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(resume_a, PathBuf::from("a.txt"));
        assert_eq!(resume_b, PathBuf::from("b.txt"));
        assert_eq!(job, Some(PathBuf::from("jd.txt")));
    }

    #[test]
    fn test_parse_rank_requires_resumes() {
        assert!(Cli::try_parse_from(["matcher", "rank"]).is_err());
        let cli = Cli::try_parse_from(["matcher", "rank", "-j", "jd.txt", "a.txt", "b.txt"]).unwrap();
        let Commands::Rank { resumes, job } = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(resumes.len(), 2);
        assert!(job.is_some());
    }

    #[test]
    fn test_parse_match_without_job() {
        let cli = Cli::try_parse_from(["matcher", "match", "--resume", "cv.txt"]).unwrap();
        assert!(matches!(cli.command, Commands::Match { job: None, .. }));
    }
}
