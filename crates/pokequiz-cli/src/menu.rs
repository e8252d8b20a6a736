//! Main menu parsing and the plain-text views printed between sessions.

use pokequiz_core::modes;
use pokequiz_core::session::{SessionEnd, SessionSummary};
use pokequiz_types::{AbilitySlot, ModeInfo, QuizMode, RoundEntry, Species, Standing};

use crate::terminal::typing_label;

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// List the registered modes with their descriptions.
    ViewModes,
    /// Play a mode.
    Play(QuizMode),
    /// Show the general standings.
    Leaderboard,
    /// Pick a mode and show its own round board.
    ModeBoards,
    /// Look a species up by name.
    Search,
    /// Leave the program.
    Quit,
}

const VIEW_MODES: u32 = 1;
const FIRST_MODE: u32 = 2;
const LEADERBOARD: u32 = 9;
const MODE_BOARDS: u32 = 10;
const SEARCH: u32 = 11;

/// Parse one menu line. Returns `None` for anything unrecognised.
pub fn parse(line: &str) -> Option<MenuChoice> {
    let input = line.trim().to_lowercase();
    if matches!(input.as_str(), "0" | "q" | "quit") {
        return Some(MenuChoice::Quit);
    }

    match input.parse::<u32>().ok()? {
        VIEW_MODES => Some(MenuChoice::ViewModes),
        LEADERBOARD => Some(MenuChoice::Leaderboard),
        MODE_BOARDS => Some(MenuChoice::ModeBoards),
        SEARCH => Some(MenuChoice::Search),
        n => {
            let index = usize::try_from(n.checked_sub(FIRST_MODE)?).ok()?;
            QuizMode::ALL.get(index).copied().map(MenuChoice::Play)
        }
    }
}

/// The main menu.
pub fn render_menu() -> String {
    let mut lines = vec!["\n=== Pokequiz ===".to_owned(), format!("  {VIEW_MODES}) View game modes")];
    for (number, mode) in (FIRST_MODE..).zip(QuizMode::ALL) {
        lines.push(format!("  {number}) {}", modes::descriptor(mode).title));
    }
    lines.push(format!("  {LEADERBOARD}) Leaderboard"));
    lines.push(format!("  {MODE_BOARDS}) Mode leaderboards"));
    lines.push(format!("  {SEARCH}) Search Pokémon"));
    lines.push("  0) Quit".to_owned());
    lines.join("\n")
}

/// The mode picker shown before a round board.
pub fn render_board_menu() -> String {
    let mut lines = vec!["\n--- Mode leaderboards ---".to_owned()];
    for (number, mode) in (1_u32..).zip(QuizMode::ALL) {
        lines.push(format!("  {number}) {}", modes::descriptor(mode).title));
    }
    lines.push("  0) Back".to_owned());
    lines.join("\n")
}

/// Parse a round board pick. `None` means back, or an unknown entry.
pub fn parse_board(line: &str) -> Option<QuizMode> {
    let number = line.trim().parse::<usize>().ok()?;
    QuizMode::ALL.get(number.checked_sub(1)?).copied()
}

/// The registered modes with their descriptions.
pub fn render_modes(registered: &[ModeInfo]) -> String {
    if registered.is_empty() {
        return "No game modes are registered.".to_owned();
    }
    registered
        .iter()
        .map(|info| {
            format!(
                "  [{}] {}: {}",
                info.id,
                info.name,
                info.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A ranked standings table.
pub fn render_standings(title: &str, standings: &[Standing]) -> String {
    let mut lines = vec![format!("\n--- {title} ---")];
    if standings.is_empty() {
        lines.push("  No rounds played yet.".to_owned());
    }
    for (rank, standing) in (1_u32..).zip(standings) {
        lines.push(format!(
            "  {rank:>2}. {:<16} {:>6} pts  {:>3} rounds  {}W/{}L",
            standing.username,
            standing.total_score,
            standing.rounds,
            standing.correct,
            standing.incorrect
        ));
    }
    lines.join("\n")
}

/// The best rounds of one mode.
pub fn render_round_board(mode: QuizMode, entries: &[RoundEntry]) -> String {
    let mut lines = vec![format!("\n--- {} ---", modes::descriptor(mode).title)];
    if entries.is_empty() {
        lines.push("  No rounds played yet.".to_owned());
    }
    for (rank, entry) in (1_u32..).zip(entries) {
        lines.push(format!(
            "  {rank:>2}. {:<16} {} -> {}  {} {:>4} pts  {}",
            entry.username,
            entry.question,
            entry.guess,
            if entry.is_correct { "Yes" } else { "No " },
            entry.score,
            entry.played_at.format("%Y-%m-%d %H:%M")
        ));
    }
    lines.join("\n")
}

/// A species card for the search view.
pub fn render_species(species: &Species) -> String {
    let heading = species.dex_number.map_or_else(
        || species.name.clone(),
        |dex| format!("#{dex:03} {}", species.name),
    );
    let mut lines = vec![match species.species_group.as_deref() {
        Some(group) => format!("\n{heading} ({group})"),
        None => format!("\n{heading}"),
    }];

    if let Some(typing) = &species.typing {
        lines.push(format!("  Type: {}", typing_label(typing)));
    }
    if let Some(abilities) = &species.abilities {
        let names: Vec<String> = abilities
            .filled()
            .into_iter()
            .map(|(slot, ability)| match slot {
                AbilitySlot::Hidden => format!("{} (hidden)", ability.name),
                AbilitySlot::Primary | AbilitySlot::Secondary => ability.name.clone(),
            })
            .collect();
        lines.push(format!("  Abilities: {}", names.join(", ")));
    }
    if let Some(weight) = species.weight {
        lines.push(format!("  Weight: {weight} kg"));
    }
    if let Some(groups) = &species.egg_groups {
        let label = groups.second.as_ref().map_or_else(
            || groups.first.name.clone(),
            |second| format!("{}/{}", groups.first.name, second.name),
        );
        lines.push(format!("  Egg groups: {label}"));
    }
    match &species.stats {
        Some(stats) => lines.push(format!(
            "  HP {} | Atk {} | Def {} | SpA {} | SpD {} | Spe {} | Total {}",
            stats.hp, stats.attack, stats.defense, stats.sp_atk, stats.sp_def, stats.speed, stats.total
        )),
        None => lines.push("  No base stats recorded.".to_owned()),
    }
    lines.join("\n")
}

/// Totals printed after a session ends.
pub fn render_summary(summary: &SessionSummary) -> String {
    let reason = match summary.end {
        SessionEnd::PlayerQuit => "Thanks for playing!",
        SessionEnd::NoEligibleData => "This mode has nothing to ask yet.",
        SessionEnd::StoreUnavailable => "The catalog could not be read.",
        SessionEnd::InputClosed => "Input closed.",
    };
    let mut lines = vec![
        format!(
            "\n{reason} {} of {} correct, {} points.",
            summary.correct, summary.rounds, summary.points
        ),
    ];
    if summary.unrecorded > 0 {
        lines.push(format!(
            "{} round(s) could not be saved to the leaderboard.",
            summary.unrecorded
        ));
    }
    lines.join("\n")
}
