use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use xc_decoder::{disassemble, render, CommentSet};

#[derive(Debug, StructOpt)]
#[structopt(name = "xc-dis")]
struct Opts {
    /// The Xbox BIOS image to disassemble
    #[structopt(parse(from_os_str))]
    image: PathBuf,

    /// Write the disassembly here instead of the console
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Tab-separated pattern/comment pairs appended to matching lines
    #[structopt(short, long, parse(from_os_str))]
    comments: Option<PathBuf>,
}

fn load_file(path: impl AsRef<Path>) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buf = vec![];
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn load_comments(path: Option<&Path>) -> Result<CommentSet, String> {
    let path = match path {
        Some(path) => path,
        None => return Ok(CommentSet::new()),
    };

    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Could not read comment file. {err}"))?;

    CommentSet::parse(&text).map_err(|err| err.to_string())
}

fn main() {
    tracing_subscriber::fmt::init();

    let opts = Opts::from_args();

    let image = match load_file(&opts.image) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Could not read image file. {err}");
            std::process::exit(1);
        }
    };

    let comments = match load_comments(opts.comments.as_deref()) {
        Ok(comments) => comments,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let disassembly = match disassemble(&image) {
        Ok(disassembly) => disassembly,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "decoded {} x-codes using the {:?} opcode set",
        disassembly.xcodes.len(),
        disassembly.version
    );

    let output = render(&disassembly, &comments);

    match &opts.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, &output) {
                eprintln!("Could not write output file. {err}");
                std::process::exit(1);
            }
        }
        None => print!("{output}"),
    }
}
