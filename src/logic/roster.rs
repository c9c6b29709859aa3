//! Bulk registration from a CSV roster (one player name per row, first column).

use crate::models::{PlayerId, Tournament, TournamentError};
use std::io::Read;

/// Player names from CSV. Blank rows and an optional `name` header are skipped.
pub fn read_player_names<R: Read>(reader: R) -> Result<Vec<String>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Register every name in the roster (Setup only). Returns the new player ids in file order.
pub fn import_players<R: Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<Vec<PlayerId>, TournamentError> {
    let names = read_player_names(reader).map_err(|e| TournamentError::RosterImport(e.to_string()))?;
    let ids = names
        .into_iter()
        .map(|name| tournament.register_player(name))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("Imported {} players into tournament {}", ids.len(), tournament.id);
    Ok(ids)
}
