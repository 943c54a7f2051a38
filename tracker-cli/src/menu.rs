//! Numbered console menu over a [`Tracker`].

use std::io::{BufRead, Write};

use anyhow::Result;
use tracker_core::{IngestRequest, ObservationStore, Tracker, TrackerError};

const MENU: &str = "\n--- MENU ---
1. Add new observation
2. List all observations
3. Update an observation note
4. Delete an observation
5. Exit";

/// Run the menu until the operator exits or input ends.
///
/// Not-found conditions are reported and the loop continues. A non-integer id
/// or a network/storage failure ends the loop with an error.
pub async fn run_menu<S, R, W>(tracker: &mut Tracker<S>, mut input: R, mut out: W) -> Result<()>
where
    S: ObservationStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Welcome to Local Weather Tracker")?;

    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut out, "Enter your choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                let Some(city) = prompt(&mut input, &mut out, "Enter city: ")? else { break };
                let Some(country) = prompt(&mut input, &mut out, "Enter country: ")? else { break };

                match tracker.add(&IngestRequest::new(city, country)).await {
                    Ok(obs) => writeln!(out, "Added observation: {obs}")?,
                    Err(TrackerError::CityNotFound(_)) => writeln!(out, "City not found.")?,
                    Err(e) => return Err(e.into()),
                }
            }
            "2" => {
                let observations = tracker.list()?;
                if observations.is_empty() {
                    writeln!(out, "No observations available.")?;
                }
                for obs in observations {
                    writeln!(out, "{obs}")?;
                }
            }
            "3" => {
                let Some(raw) = prompt(&mut input, &mut out, "Enter observation ID: ")? else {
                    break;
                };
                let id = parse_id(&raw)?;
                let Some(note) = prompt(&mut input, &mut out, "Enter new note: ")? else { break };

                match tracker.update_note(id, &note) {
                    Ok(_) => writeln!(out, "Note updated for observation {id}.")?,
                    Err(TrackerError::ObservationNotFound(_)) => {
                        writeln!(out, "Observation ID not found.")?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            "4" => {
                let Some(raw) =
                    prompt(&mut input, &mut out, "Enter observation ID to delete: ")?
                else {
                    break;
                };
                let id = parse_id(&raw)?;

                match tracker.delete(id) {
                    Ok(()) => writeln!(out, "Observation {id} deleted.")?,
                    Err(TrackerError::ObservationNotFound(_)) => {
                        writeln!(out, "Observation ID not found.")?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            "5" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Print a prompt and read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn parse_id(raw: &str) -> Result<i64, TrackerError> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map_err(|_| TrackerError::invalid_input(format!("'{raw}' is not an observation id")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use tracker_core::{CurrentConditions, MemoryObservationStore, WeatherProvider};

    #[derive(Debug)]
    struct ParisOnly;

    #[async_trait]
    impl WeatherProvider for ParisOnly {
        async fn current_conditions(
            &self,
            request: &IngestRequest,
        ) -> tracker_core::Result<CurrentConditions> {
            if request.city != "Paris" {
                return Err(TrackerError::CityNotFound(request.city.clone()));
            }
            Ok(CurrentConditions {
                latitude: 48.8566,
                longitude: 2.3522,
                temperature_c: 15.0,
                windspeed_kmh: 10.0,
                observation_time: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            })
        }
    }

    async fn run(script: &str) -> (Tracker<MemoryObservationStore>, Result<()>, String) {
        let mut tracker = Tracker::new(MemoryObservationStore::new(), Box::new(ParisOnly));
        let mut out = Vec::new();
        let result = run_menu(&mut tracker, script.as_bytes(), &mut out).await;
        (tracker, result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn add_list_update_delete_session() {
        let script = "1\nParis\nFrance\n2\n3\n1\nRainy later\n2\n4\n1\n2\n5\n";
        let (tracker, result, out) = run(script).await;

        result.unwrap();
        assert!(out.starts_with("Welcome to Local Weather Tracker"));
        assert!(out.contains(
            "Added observation: [1] Paris, France | 15.0°C, 10.0 km/h | 2024-01-01 12:00:00 | \
             Notes: No notes"
        ));
        assert!(out.contains("Note updated for observation 1."));
        assert!(out.contains("Notes: Rainy later"));
        assert!(out.contains("Observation 1 deleted."));
        assert!(out.contains("No observations available."));
        assert!(out.trim_end().ends_with("Goodbye!"));
        assert!(tracker.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_city_is_reported() {
        let (tracker, result, out) = run("1\nAtlantis\nOcean\n5\n").await;

        result.unwrap();
        assert!(out.contains("City not found."));
        assert!(tracker.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_ids_are_reported_and_loop_continues() {
        let (_, result, out) = run("3\n42\nhello\n4\n42\n5\n").await;

        result.unwrap();
        assert_eq!(out.matches("Observation ID not found.").count(), 2);
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn invalid_choice_prompts_again() {
        let (_, result, out) = run("9\n5\n").await;

        result.unwrap();
        assert!(out.contains("Invalid choice. Please try again."));
    }

    #[tokio::test]
    async fn non_integer_id_ends_the_menu() {
        let (_, result, out) = run("4\nabc\n5\n").await;

        let err = result.unwrap_err();
        let tracker_err = err.downcast_ref::<TrackerError>().expect("tracker error");
        assert!(matches!(tracker_err, TrackerError::InvalidInput(_)));
        assert!(!out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let (_, result, out) = run("2\n").await;

        result.unwrap();
        assert!(out.contains("No observations available."));
    }

    #[test]
    fn parse_id_accepts_surrounding_whitespace() {
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
        assert!(parse_id("1.5").is_err());
    }
}
