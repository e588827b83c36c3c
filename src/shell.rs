//! Line-oriented interactive session over stdin/stdout.

use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::expand_path;
use crate::dte::{DocumentType, YearMonth};
use crate::error::{DteError, Result};
use crate::input::read_documents;
use crate::render::{
    render_chart_text, render_files, render_months, render_table, render_types,
};
use crate::session::{Listing, PageMove, Session};

pub const HELP: &str = "\
Commands:
  load <path>...          add JSON files or directories
  files [first|prev|next|last|N]
  types                   list available document types
  type <code>|none        select a document type (clears months)
  months                  list months of the selected type
  month <YYYY-MM>...      toggle months; 'month clear' removes all
  search [text]           filter table rows; no text clears the search
  table [first|prev|next|last|N]
  chart                   text chart of the type+month selection
  export [dir]            write {type}_{months}.zip
  reset                   drop all files and filters
  help
  quit";

const PROMPT: &str = "dte> ";

/// Outcome of one shell command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run commands from `input` until EOF or `quit`.
///
/// Command errors are printed and never end the session. A line that is not
/// valid UTF-8 is decoded lossily and handled like any other line. A failed
/// read from `input` is printed and ends the session; only failures to write
/// to `output` are returned.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                writeln!(output, "Error: {e}")?;
                return Ok(());
            }
        }
        let line = String::from_utf8_lossy(&buf);
        match execute(session, line.trim()) {
            Ok((text, flow)) => {
                if !text.is_empty() {
                    writeln!(output, "{text}")?;
                }
                if flow == Flow::Quit {
                    return Ok(());
                }
            }
            Err(e) => writeln!(output, "Error: {e}")?,
        }
    }
    writeln!(output)?;
    Ok(())
}

fn parse_move(arg: Option<&str>) -> Result<Option<PageMove>> {
    let page = match arg {
        None => return Ok(None),
        Some("first") => PageMove::First,
        Some("prev") => PageMove::Prev,
        Some("next") => PageMove::Next,
        Some("last") => PageMove::Last,
        Some(n) => PageMove::Jump(
            n.parse()
                .map_err(|_| DteError::InvalidPageMove(n.to_string()))?,
        ),
    };
    Ok(Some(page))
}

fn execute(session: &mut Session, line: &str) -> Result<(String, Flow)> {
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let text = match command {
        "" => String::new(),
        "help" | "?" => HELP.to_string(),
        "quit" | "exit" => return Ok((String::new(), Flow::Quit)),
        "load" => {
            let paths: Vec<PathBuf> = args.iter().map(|a| expand_path(a)).collect();
            load(session, &paths)
        }
        "files" => {
            if let Some(page) = parse_move(args.first().copied())? {
                session.navigate(Listing::Files, page)?;
            }
            render_files(session)
        }
        "types" => render_types(session),
        "type" => {
            let selected = match args.first() {
                None | Some(&"none") => None,
                Some(code) => Some(code.parse::<DocumentType>()?),
            };
            session.select_type(selected);
            match selected {
                Some(t) => format!(
                    "Selected {} ({}); {} month(s) available",
                    t.code(),
                    t.name(),
                    session.available_months().len()
                ),
                None => "No type selected".to_string(),
            }
        }
        "months" => render_months(session),
        "month" => {
            if args == ["clear"] {
                session.select_months(std::iter::empty());
            } else {
                let months = args
                    .iter()
                    .map(|a| a.parse::<YearMonth>())
                    .collect::<Result<Vec<_>>>()?;
                for month in months {
                    session.toggle_month(month);
                }
            }
            render_months(session)
        }
        "search" => {
            session.set_search(rest);
            format!("{} matching row(s)", session.views().filtered.len())
        }
        "table" => {
            if let Some(page) = parse_move(args.first().copied())? {
                session.navigate(Listing::Data, page)?;
            }
            render_table(session)
        }
        "chart" => render_chart_text(&session.chart()),
        "export" => {
            let dir = match args.first() {
                Some(dir) => expand_path(dir),
                None => expand_path(&session.config().export.output_dir),
            };
            export(session, &dir)?
        }
        "reset" => {
            session.reset();
            "Session cleared".to_string()
        }
        other => format!("Unknown command '{other}'. Type 'help' for a list of commands."),
    };
    Ok((text, Flow::Continue))
}

/// Ingest files and describe the outcome
pub fn load(session: &mut Session, paths: &[PathBuf]) -> String {
    let batch = read_documents(paths);
    let total = batch.len();
    let report = session.ingest_read(batch);
    let mut text = format!("Loaded {} of {} file(s)", report.added.len(), total);
    for (name, err) in &report.rejected {
        text.push_str(&format!("\n  skipped {name}: {err}"));
    }
    text
}

/// Build the archive for the current selection and save it under `dir`
pub fn export(session: &Session, dir: &Path) -> Result<String> {
    let archive = session.export()?;
    let path = archive.save_in(dir)?;
    Ok(format!(
        "Exported {} document(s) to {}",
        archive.entries,
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dte::receipt::tests::sample_json;
    use std::fs;
    use tempfile::TempDir;

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run(session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let docs = [
            ("a.json", "01", "2024-01-05", "10.00"),
            ("b.json", "01", "2024-01-20", "20.00"),
            ("c.json", "01", "2024-02-10", "30.00"),
        ];
        for (name, tipo, fecha, total) in docs {
            fs::write(dir.path().join(name), sample_json(tipo, fecha, total)).unwrap();
        }
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        dir
    }

    #[test]
    fn walks_through_a_session() {
        let dir = fixture_dir();
        let out_dir = dir.path().join("out");
        let script = format!(
            "load {}\ntype 01\nmonth 2024-01\nsearch amanda\nchart\nexport {}\nquit\n",
            dir.path().display(),
            out_dir.display()
        );
        let mut session = Session::new(Config::default());
        let out = run_script(&mut session, &script);

        assert!(out.contains("Loaded 3 of 4 file(s)"));
        assert!(out.contains("skipped broken.json"));
        assert!(out.contains("Selected 01 (Factura); 2 month(s) available"));
        assert!(out.contains("2 matching row(s)"));
        assert!(out.contains("Total a Pagar: 20"));
        assert!(out.contains("Exported 2 document(s)"));
        assert!(out_dir.join("01_2024-01.zip").exists());
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut session = Session::new(Config::default());
        let out = run_script(&mut session, "type 99\nmonth 2024-13\nexport\nfrobnicate\ntypes\n");
        assert!(out.contains("Unknown document type '99'"));
        assert!(out.contains("Invalid month '2024-13'"));
        assert!(out.contains("No document type selected"));
        assert!(out.contains("Unknown command 'frobnicate'"));
        assert!(out.contains("No data to display."));
    }

    #[test]
    fn invalid_utf8_line_does_not_end_the_session() {
        let mut session = Session::new(Config::default());
        let mut out = Vec::new();
        run(&mut session, &b"types\n\xff\xfe\ntypes\nquit\n"[..], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Unknown command"));
        assert_eq!(out.matches("No data to display.").count(), 2);
    }

    #[test]
    fn missing_path_is_skipped_within_a_load() {
        let dir = fixture_dir();
        let script = format!(
            "load {} {}\ntypes\n",
            dir.path().join("a.json").display(),
            dir.path().join("missing.json").display()
        );
        let mut session = Session::new(Config::default());
        let out = run_script(&mut session, &script);
        assert!(out.contains("Loaded 1 of 2 file(s)"));
        assert!(out.contains("skipped missing.json: Input path not found"));
        assert!(out.contains("Factura"));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn reset_then_types_is_empty() {
        let dir = fixture_dir();
        let script = format!("load {}\nreset\nfiles\n", dir.path().display());
        let mut session = Session::new(Config::default());
        let out = run_script(&mut session, &script);
        assert!(out.contains("Session cleared"));
        assert!(out.contains("No files loaded."));
        assert!(session.store().is_empty());
    }
}
