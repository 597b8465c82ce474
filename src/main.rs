use arkiv::build::build_archives;
use clap::{App, Arg};
use std::path::Path;
use std::process::exit;

fn main() {
    let matches = App::new("arkiv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates date-based archive pages for a static blog")
        .arg(
            Arg::with_name("PROJECT")
                .help("The project directory (holds site.yaml, posts.yaml, and layouts/)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("The output directory for generated pages")
                .required(true)
                .index(2),
        )
        .get_matches();

    // Both args are required, so value_of() can't return None.
    let project_dir = Path::new(matches.value_of("PROJECT").unwrap());
    let output_dir = Path::new(matches.value_of("OUTPUT").unwrap());

    match build_archives(project_dir, output_dir) {
        Ok(pages) => println!("Wrote {} archive page(s)", pages.len()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
