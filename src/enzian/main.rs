use std::io::{self, Write};

use anyhow::{Context, bail};
use chrono::{Local, NaiveTime};
use clap::Parser;
use log::{debug, info};

use reiseauskunft::date_keywords::{mentions_year, normalize_travel_date, replace_date_keywords};
use reiseauskunft::dialog::{DialogEvent, PlanningStage};
use reiseauskunft::geo_path::extract_first_trip_path;
use reiseauskunft::models::{PlaceCandidate, TravelDirection, TravelRequest};
use reiseauskunft::ojp_client::OjpClient;
use reiseauskunft::place_lookup::{PlaceResolution, lookup_stop_place};
use reiseauskunft::render::format_ranked;
use reiseauskunft::time_normalize::normalize_time_of_day;
use reiseauskunft::trip_parse::parse_trip_response;
use reiseauskunft::trip_rank::rank_itineraries;

#[derive(Parser, Debug)]
#[command(version, about = "Fahrplanauskunft über die OJP-Schnittstelle", long_about = None)]
struct Args {
    /// Startort
    #[arg(long)]
    from: String,
    /// Zielort
    #[arg(long)]
    to: String,
    /// Reisedatum, auch relativ ("morgen", "nächsten Montag")
    #[arg(long)]
    date: Option<String>,
    /// Uhrzeit, z.B. "9:45"
    #[arg(long)]
    time: Option<String>,
    /// Uhrzeit als späteste Ankunft statt früheste Abfahrt
    #[arg(long, default_value_t = false)]
    arrive_by: bool,
    /// Koordinatenpfad der schnellsten Verbindung ausgeben
    #[arg(long, default_value_t = false)]
    show_path: bool,
    #[arg(long, default_value = reiseauskunft::DEFAULT_OJP_ENDPOINT)]
    endpoint: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let api_key = std::env::var("OJP_API_KEY").context("OJP_API_KEY must be set")?;
    let client = OjpClient::new(&args.endpoint, &api_key, "enzian");

    let today = Local::now().date_naive();
    let date = match &args.date {
        Some(raw) => {
            let replaced = replace_date_keywords(raw);
            if &replaced != raw {
                info!("Datumsausdruck ersetzt: {:?} -> {:?}", raw, replaced);
            }
            normalize_travel_date(&replaced, mentions_year(raw), today)
        }
        None => today,
    };
    let time_text = normalize_time_of_day(args.time.as_deref().unwrap_or(""));
    let time = NaiveTime::parse_from_str(&time_text, "%H:%M:%S")
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(8, 0, 0).expect("valid literal"));

    let request = TravelRequest {
        origin_text: args.from.clone(),
        destination_text: args.to.clone(),
        date,
        time,
        direction: if args.arrive_by {
            TravelDirection::ArriveBefore
        } else {
            TravelDirection::DepartAfter
        },
    };
    println!("Reise am {} um {} Uhr.", request.date, request.time);

    let mut stage = PlanningStage::Collecting.advance(DialogEvent::RequestComplete);
    debug!("stage: {:?}", stage);

    let Some(origin) = resolve_or_choose(&client, &request.origin_text)? else {
        stage = stage.advance(DialogEvent::PlaceNotFound);
        debug!("stage: {:?}", stage);
        bail!("keine Haltestelle gefunden für {:?}", request.origin_text);
    };
    let Some(destination) = resolve_or_choose(&client, &request.destination_text)? else {
        stage = stage.advance(DialogEvent::PlaceNotFound);
        debug!("stage: {:?}", stage);
        bail!(
            "keine Haltestelle gefunden für {:?}",
            request.destination_text
        );
    };
    stage = stage.advance(DialogEvent::PlacesResolved);
    debug!("stage: {:?}", stage);

    let document = client.fetch_trip(&origin, &destination, &request)?;
    let candidates = parse_trip_response(&document)?;
    info!("{} verwertbare Verbindungen", candidates.len());

    match rank_itineraries(candidates) {
        Some(ranked) => {
            stage = stage.advance(DialogEvent::ItineraryReady);
            println!();
            println!("{}", format_ranked(&ranked));

            if args.show_path {
                println!();
                for point in extract_first_trip_path(&document)? {
                    println!("{:.6},{:.6}", point.x(), point.y());
                }
            }
            stage = stage.advance(DialogEvent::Confirmed);
        }
        None => {
            stage = stage.advance(DialogEvent::NothingToPresent);
            println!("Keine fahrplanmäßigen Verbindungen gefunden.");
        }
    }

    debug!("stage: {:?}", stage);
    debug_assert!(stage.is_terminal());
    Ok(())
}

fn resolve_or_choose(
    client: &OjpClient,
    query: &str,
) -> anyhow::Result<Option<PlaceCandidate>> {
    info!("suche Ort {:?}", query);
    match lookup_stop_place(client, query)? {
        PlaceResolution::Unambiguous(place) => {
            info!("gefunden: {} ({})", place.name, place.id);
            Ok(Some(place))
        }
        PlaceResolution::NeedsChoice(candidates) => Ok(Some(choose_from(candidates)?)),
        PlaceResolution::NoCandidates => Ok(None),
    }
}

/// Numbered pick over the non-exact matches, read from stdin.
fn choose_from(candidates: Vec<PlaceCandidate>) -> anyhow::Result<PlaceCandidate> {
    println!("Mehrere Haltestellen gefunden. Bitte Nummer wählen:");
    for (i, candidate) in candidates.iter().enumerate() {
        println!("  {}) {}", i + 1, candidate.name);
    }
    loop {
        print!("Nummer: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            bail!("Eingabe abgebrochen");
        }
        if let Ok(choice) = line.trim().parse::<usize>() {
            if (1..=candidates.len()).contains(&choice) {
                return Ok(candidates[choice - 1].clone());
            }
        }
        println!("Ungültig. Bitte Zahl zwischen 1 und {}.", candidates.len());
    }
}
