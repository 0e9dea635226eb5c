use std::env;
use std::path::PathBuf;
use std::process;

mod beeper;
mod keymap;
mod run;

const USAGE: &str = "usage: chip8 [--mute] [--scale N] <rom>";

struct Options {
    rom: PathBuf,
    mute: bool,
    scale: u32,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut rom = None;
    let mut mute = false;
    let mut scale = 10;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mute" => mute = true,
            "--scale" => {
                let value = args
                    .next()
                    .ok_or_else(|| String::from("--scale expects a value"))?;
                scale = value
                    .parse()
                    .map_err(|_| format!("invalid scale {:?}", value))?;
            }
            _ if rom.is_none() => rom = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {:?}", arg)),
        }
    }

    Ok(Options {
        rom: rom.ok_or_else(|| String::from(USAGE))?,
        mute,
        scale,
    })
}

fn main() {
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    if let Err(e) = run::run(&options.rom, options.mute, options.scale) {
        eprintln!("chip8: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args_takes_the_rom_path() {
        let options = parse_args(args(&["rom/pong.ch8"])).unwrap();
        assert_eq!(options.rom, PathBuf::from("rom/pong.ch8"));
        assert!(!options.mute);
        assert_eq!(options.scale, 10);
    }

    #[test]
    fn test_parse_args_reads_flags_in_any_position() {
        let options = parse_args(args(&["--mute", "rom/pong.ch8", "--scale", "4"])).unwrap();
        assert!(options.mute);
        assert_eq!(options.scale, 4);
    }

    #[test]
    fn test_parse_args_requires_a_rom() {
        assert!(parse_args(args(&["--mute"])).is_err());
    }

    #[test]
    fn test_parse_args_rejects_a_second_positional() {
        assert!(parse_args(args(&["a.ch8", "b.ch8"])).is_err());
    }
}
