//! The investigation's five narrative phases.

use crate::ids::CharacterId;
use crate::timeline::{InvestigationPhase, PhaseSchedule};
use crate::value_objects::{InvestigationProgress, TimeOfDay};

fn cids(slugs: &[&str]) -> Vec<CharacterId> {
    slugs.iter().map(|s| CharacterId::new(*s)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const EVERYONE: &[&str] = &[
    "james-blackwood",
    "victoria-blackwood",
    "thomas-reed",
    "margaret-holloway",
    "sophia-crane",
];

/// The authored phase schedule: thresholds at 0, 10, 25, 50 and 75 percent.
pub fn schedule() -> PhaseSchedule {
    PhaseSchedule::new(vec![
        InvestigationPhase {
            id: "arrival".into(),
            name: "Arrival at the Manor".into(),
            time_window: "9:30 PM - 10:30 PM".into(),
            required_progress: InvestigationProgress::new(0),
            available_characters: cids(&["victoria-blackwood", "thomas-reed"]),
            available_locations: strings(&["The Study", "The Great Hall"]),
            location: "The Study".into(),
            time_of_day: TimeOfDay::Evening,
        },
        InvestigationPhase {
            id: "questioning".into(),
            name: "Questioning the Household".into(),
            time_window: "10:30 PM - Midnight".into(),
            required_progress: InvestigationProgress::new(10),
            available_characters: cids(EVERYONE),
            available_locations: strings(&["The Drawing Room", "The Study", "The Library"]),
            location: "The Drawing Room".into(),
            time_of_day: TimeOfDay::Night,
        },
        InvestigationPhase {
            id: "gathering-evidence".into(),
            name: "Gathering Evidence".into(),
            time_window: "Midnight - 2:00 AM".into(),
            required_progress: InvestigationProgress::new(25),
            available_characters: cids(EVERYONE),
            available_locations: strings(&[
                "The Library",
                "The Study",
                "The Servants' Stair",
                "The Dispensary",
            ]),
            location: "The Library".into(),
            time_of_day: TimeOfDay::Night,
        },
        InvestigationPhase {
            id: "confrontations".into(),
            name: "Confrontations".into(),
            time_window: "2:00 AM - 4:00 AM".into(),
            required_progress: InvestigationProgress::new(50),
            available_characters: cids(EVERYONE),
            available_locations: strings(&["The Conservatory", "The Study"]),
            location: "The Conservatory".into(),
            time_of_day: TimeOfDay::LateNight,
        },
        InvestigationPhase {
            id: "final-accusation".into(),
            name: "The Final Accusation".into(),
            time_window: "4:00 AM - Dawn".into(),
            required_progress: InvestigationProgress::new(75),
            available_characters: cids(EVERYONE),
            available_locations: strings(&["The Study"]),
            location: "The Study".into(),
            time_of_day: TimeOfDay::Dawn,
        },
    ])
    .expect("authored phase schedule is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_has_five_phases() {
        assert_eq!(schedule().phases().len(), 5);
    }

    #[test]
    fn test_early_phase_limits_the_roster() {
        let schedule = schedule();
        let arrival = schedule.phase_for(InvestigationProgress::new(5));
        assert_eq!(arrival.id, "arrival");
        assert_eq!(arrival.available_characters.len(), 2);

        let questioning = schedule.phase_for(InvestigationProgress::new(10));
        assert_eq!(questioning.available_characters.len(), 5);
    }
}
