use bag::{Collection, PageSource};
use kaart::{debounce, LogSurface, MapEvent, Overlay, Viewer, ViewerConfig, Viewport};
use log::error;
use rd::{LatLon, Transform};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  draw                              start drawing a bounding box
  click <lat> <lon>                 click on the map
  clear                             remove the bounding box
  use-bbox                          copy the box into the download panel
  view <south> <west> <north> <east>  move the map
  buildings on|off                  toggle the buildings layer
  download panden [gemeente=..] [postcode=..]
  download vbo <pand id>
  status                            show panel state
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Draw,
    Click(LatLon),
    Clear,
    UseBbox,
    View(Viewport),
    Buildings(bool),
    DownloadPanden { gemeente: String, postcode: String },
    DownloadVbo(String),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

fn numbers<const N: usize>(args: &[&str], usage: &'static str) -> Result<[f64; N], ParseError> {
    let values = args
        .iter()
        .map(|a| a.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::Usage(usage))?;
    values.try_into().map_err(|_| ParseError::Usage(usage))
}

/// `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(None);
    };

    let parsed = match command {
        "draw" => ShellCommand::Draw,
        "clear" => ShellCommand::Clear,
        "use-bbox" => ShellCommand::UseBbox,
        "status" => ShellCommand::Status,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "click" => {
            let [lat, lon] = numbers(args, "click <lat> <lon>")?;
            ShellCommand::Click(LatLon::new(lat, lon))
        }
        "view" => {
            let [s, w, n, e] = numbers(args, "view <south> <west> <north> <east>")?;
            ShellCommand::View(Viewport::new(
                LatLon::new(s.min(n), w.min(e)),
                LatLon::new(s.max(n), w.max(e)),
            ))
        }
        "buildings" => match args {
            ["on"] => ShellCommand::Buildings(true),
            ["off"] => ShellCommand::Buildings(false),
            _ => return Err(ParseError::Usage("buildings on|off")),
        },
        "download" => match args {
            ["vbo", pand_id] => ShellCommand::DownloadVbo((*pand_id).into()),
            ["vbo"] => ShellCommand::DownloadVbo(String::new()),
            ["panden", filters @ ..] => {
                let mut gemeente = String::new();
                let mut postcode = String::new();
                for filter in filters {
                    match filter.split_once('=') {
                        Some(("gemeente", v)) => gemeente = v.into(),
                        Some(("postcode", v)) => postcode = v.into(),
                        _ => {
                            return Err(ParseError::Usage(
                                "download panden [gemeente=..] [postcode=..]",
                            ))
                        }
                    }
                }
                ShellCommand::DownloadPanden { gemeente, postcode }
            }
            _ => return Err(ParseError::Usage("download panden|vbo ...")),
        },
        other => return Err(ParseError::Unknown(other.into())),
    };
    Ok(Some(parsed))
}

async fn execute<S: PageSource>(viewer: &mut Viewer<S, LogSurface>, command: ShellCommand) {
    match command {
        ShellCommand::Draw => {
            if viewer.start_drawing() {
                println!("{}", viewer.panel().draw_label);
            } else {
                println!("already drawing");
            }
        }
        ShellCommand::Click(at) => {
            if let Err(e) = viewer.handle(MapEvent::Click(at)).await {
                println!("{e}");
            }
            match viewer.current_bbox() {
                Some(bbox) if !viewer.session().is_listening() => println!("bbox: {bbox}"),
                _ => println!("{}", viewer.panel().draw_label),
            }
        }
        ShellCommand::Clear => viewer.clear_bbox(),
        ShellCommand::UseBbox => match viewer.use_bbox_for_download() {
            Ok(_) => println!("bbox: {}", viewer.panel().bbox_field),
            Err(alert) => println!("{alert}"),
        },
        ShellCommand::Buildings(on) => {
            let event = if on {
                MapEvent::OverlayAdd(Overlay::Buildings)
            } else {
                MapEvent::OverlayRemove(Overlay::Buildings)
            };
            if let Err(e) = viewer.handle(event).await {
                println!("{e}");
            }
        }
        ShellCommand::DownloadPanden { gemeente, postcode } => {
            let outcome = viewer.download_panden(&gemeente, &postcode).await;
            println!("{}", viewer.report(Collection::Panden, &outcome));
        }
        ShellCommand::DownloadVbo(pand_id) => {
            let outcome = viewer.download_vbo(&pand_id).await;
            println!("{}", viewer.report(Collection::Verblijfsobjecten, &outcome));
        }
        ShellCommand::Status => {
            let panel = viewer.panel();
            println!("view:      {}", viewer.viewport());
            let enabled = if panel.draw_enabled { "enabled" } else { "disabled" };
            println!("draw:      {} ({enabled})", panel.draw_label);
            match panel.coordinates {
                Some(bbox) => println!("bbox:      {bbox}"),
                None => println!("bbox:      -"),
            }
            println!("buildings: {} shown", viewer.map().buildings.len());
        }
        ShellCommand::Help => println!("{HELP}"),
        // handled by the loop
        ShellCommand::View(_) | ShellCommand::Quit => {}
    }
}

/// Reads commands from stdin until `quit` or end of input.
///
/// Map moves go through the debouncer, so pasting several `view` lines
/// reloads the buildings once.
pub async fn run<S: PageSource>(config: ViewerConfig, transform: Box<dyn Transform>, source: S) {
    let (moves, mut settled) = debounce::<Viewport>(config.debounce);
    let mut viewer = Viewer::new(config, transform, source, LogSurface::new());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("could not read input: {e}");
                        break;
                    }
                };
                match parse(&line) {
                    Ok(None) => {}
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(ShellCommand::View(viewport))) => {
                        if moves.send(viewport).is_err() {
                            break;
                        }
                    }
                    Ok(Some(command)) => execute(&mut viewer, command).await,
                    Err(e) => println!("{e}"),
                }
            }
            Some(viewport) = settled.next() => {
                if let Err(e) = viewer.handle(MapEvent::MoveEnd(viewport)).await {
                    println!("{e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("draw"), Ok(Some(ShellCommand::Draw)));
        assert_eq!(
            parse("click 52.01 4.36"),
            Ok(Some(ShellCommand::Click(LatLon::new(52.01, 4.36))))
        );
        assert_eq!(
            parse("view 52.025 4.40 51.995 4.335"),
            Ok(Some(ShellCommand::View(Viewport::initial())))
        );
        assert_eq!(parse("buildings off"), Ok(Some(ShellCommand::Buildings(false))));
        assert_eq!(
            parse("download panden gemeente=Delft postcode=2611"),
            Ok(Some(ShellCommand::DownloadPanden {
                gemeente: "Delft".into(),
                postcode: "2611".into()
            }))
        );
        assert_eq!(
            parse("download vbo 0503100000032914"),
            Ok(Some(ShellCommand::DownloadVbo("0503100000032914".into())))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("fly"), Err(ParseError::Unknown("fly".into())));
        assert!(matches!(parse("click 52"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("click a b"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("buildings maybe"), Err(ParseError::Usage(_))));
        assert!(matches!(
            parse("download panden woonplaats=Delft"),
            Err(ParseError::Usage(_))
        ));
    }
}
