use hashmatch::{BackendKind, Roi};
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub model: Option<PathBuf>,
    pub load_model: Option<PathBuf>,
    pub save_model: Option<PathBuf>,
    pub query: Option<PathBuf>,
    pub frames: Option<PathBuf>,
    pub roi: Option<Roi>,
    pub backend: BackendKind,
    pub config: Option<PathBuf>,
    pub annotate: Option<PathBuf>,
    pub debug_mode: bool,
}

/// Value of `--flag=value` or of `--flag value`.
fn flag_value<'a, I>(arg: &str, flag: &str, rest: &mut I) -> Option<Option<String>>
where
    I: Iterator<Item = &'a String>,
{
    if arg == flag {
        return Some(rest.next().cloned());
    }
    arg.strip_prefix(flag)
        .and_then(|tail| tail.strip_prefix('='))
        .map(|value| Some(value.to_string()))
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::parse_from(&args)
    }

    pub fn parse_from(args: &[String]) -> Option<Self> {
        let mut parsed = Args {
            model: None,
            load_model: None,
            save_model: None,
            query: None,
            frames: None,
            roi: None,
            backend: BackendKind::Parallel,
            config: None,
            annotate: None,
            debug_mode: false,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!("hashmatch v{}", env!("CARGO_PKG_VERSION"));
                return None;
            } else if arg == "--debug" {
                parsed.debug_mode = true;
                continue;
            }

            let mut matched = false;
            for flag in [
                "--model",
                "--load-model",
                "--save-model",
                "--query",
                "--frames",
                "--roi",
                "--backend",
                "--config",
                "--annotate",
            ] {
                let Some(value) = flag_value(arg, flag, &mut iter) else {
                    continue;
                };
                let Some(value) = value else {
                    eprintln!("❌ Missing value for {}", flag);
                    return None;
                };
                if !parsed.apply(flag, value) {
                    return None;
                }
                matched = true;
                break;
            }

            if !matched {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        if parsed.model.is_none() && parsed.load_model.is_none() {
            eprintln!("❌ One of --model or --load-model is required");
            print_help();
            return None;
        }
        if parsed.query.is_some() && parsed.frames.is_some() {
            eprintln!("❌ Use either --query or --frames, not both");
            return None;
        }
        Some(parsed)
    }

    fn apply(&mut self, flag: &str, value: String) -> bool {
        match flag {
            "--model" => self.model = Some(PathBuf::from(value)),
            "--load-model" => self.load_model = Some(PathBuf::from(value)),
            "--save-model" => self.save_model = Some(PathBuf::from(value)),
            "--query" => self.query = Some(PathBuf::from(value)),
            "--frames" => self.frames = Some(PathBuf::from(value)),
            "--config" => self.config = Some(PathBuf::from(value)),
            "--annotate" => self.annotate = Some(PathBuf::from(value)),
            "--roi" => match Roi::parse(&value) {
                Ok(roi) => self.roi = Some(roi),
                Err(e) => {
                    eprintln!("❌ Invalid ROI '{}': {}", value, e);
                    return false;
                }
            },
            "--backend" => match value.parse::<BackendKind>() {
                Ok(kind) => self.backend = kind,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    return false;
                }
            },
            _ => return false,
        }
        true
    }
}

fn print_help() {
    println!("🔎 hashmatch - hash-based object recognition");
    println!();
    println!("USAGE:");
    println!("    hashmatch (--model <png> | --load-model <json>) [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --model <png>         Build the reference model from an image");
    println!("    --load-model <json>   Load a previously saved reference model");
    println!("    --save-model <json>   Save the reference model after building/loading it");
    println!("    --query <png>         Recognize the model in a single image");
    println!("    --frames <dir>        Recognize the model in every image of a directory (name order)");
    println!("    --roi=x,y,w,h         Search only inside this region of each frame");
    println!("    --backend=<kind>      cpu | parallel | accelerated (default: parallel, falls back to cpu)");
    println!("    --config <json>       Hashing configuration file");
    println!("    --annotate <png>      Save the query image with the detected outline (with --query)");
    println!("    --debug               Enable debug logging");
    println!("    --help, -h            Show this help message");
    println!("    --version, -v         Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    hashmatch --model logo.png --query scene.png");
    println!("    hashmatch --model logo.png --save-model logo.json");
    println!("    hashmatch --load-model logo.json --frames captures/ --roi=0,0,640,360");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_both_value_styles() {
        let parsed = Args::parse_from(&args(&[
            "--model",
            "logo.png",
            "--query=scene.png",
            "--roi=10,20,300,200",
            "--backend=cpu",
            "--debug",
        ]))
        .unwrap();

        assert_eq!(parsed.model, Some(PathBuf::from("logo.png")));
        assert_eq!(parsed.query, Some(PathBuf::from("scene.png")));
        assert_eq!(parsed.roi, Some(Roi::new(10, 20, 300, 200).unwrap()));
        assert_eq!(parsed.backend, BackendKind::Cpu);
        assert!(parsed.debug_mode);
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = Args::parse_from(&args(&["--load-model", "logo.json"])).unwrap();
        assert_eq!(parsed.backend, BackendKind::Parallel);
        assert!(parsed.roi.is_none());
        assert!(!parsed.debug_mode);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Args::parse_from(&args(&["--query", "scene.png"])).is_none());
        assert!(Args::parse_from(&args(&["--model", "a.png", "--roi=1,2,3"])).is_none());
        assert!(Args::parse_from(&args(&["--model", "a.png", "--backend=tpu"])).is_none());
        assert!(Args::parse_from(&args(&["--model"])).is_none());
        assert!(Args::parse_from(&args(&["--model", "a.png", "--bogus"])).is_none());
    }
}
