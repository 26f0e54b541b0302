//! One-line log text for a resolved encounter.

use super::result::{EncounterOutcome, EncounterResult};
use crate::vessel::Vessel;

pub fn describe(result: &EncounterResult, vessel: &Vessel) -> String {
    let ship = &vessel.name;
    let threat = result.threat_level();
    match result.outcome() {
        EncounterOutcome::Evaded { .. } => {
            format!("{ship} slipped past threat {threat} raiders unseen.")
        }
        EncounterOutcome::Negotiated { negotiator, ransom } => {
            let speaker = vessel
                .crew_member(*negotiator)
                .map_or("The crew", |c| c.name.as_str());
            format!("{speaker} talked threat {threat} raiders down for {ransom} credits.")
        }
        EncounterOutcome::Fled { delay_hours, .. } => {
            format!("{ship} fled threat {threat} raiders, losing {delay_hours:.1} hours.")
        }
        EncounterOutcome::Victory { credits_gained, .. } => {
            let raiders = format!("threat {threat} raiders");
            format!("{ship} drove off {raiders} and claimed {credits_gained} credits in bounty.")
        }
        EncounterOutcome::Harassment { delay_hours, .. } => {
            let delay = format!("{delay_hours:.1} hours");
            format!("Threat {threat} raiders harassed {ship}; arrival delayed {delay}.")
        }
        EncounterOutcome::Boarding { credits_lost, .. } => {
            let loot = format!("{credits_lost} credits");
            format!("Threat {threat} raiders boarded {ship} and made off with {loot}.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillProfile;
    use crate::vessel::{CrewMember, CrewRole, Job};

    #[test]
    fn negotiation_names_speaker() {
        let mut v = Vessel::new(3, "Osprey", 1_000.0);
        v.crew.push(CrewMember::new(
            4,
            "Marisol",
            CrewRole::Officer,
            Job::Helm,
            SkillProfile::default(),
        ));
        let outcome = EncounterOutcome::Negotiated {
            negotiator: 4,
            ransom: 320,
        };
        let result = EncounterResult::new(3, 6, 0.0, false, outcome);
        let text = describe(&result, &v);
        assert!(text.contains("Marisol"));
        assert!(text.contains("320 credits"));
    }

    #[test]
    fn harassment_mentions_delay() {
        let v = Vessel::new(3, "Osprey", 1_000.0);
        let result = EncounterResult::new(
            3,
            2,
            0.0,
            true,
            EncounterOutcome::Harassment {
                scores: crate::encounter::CombatScores { defense: 1.0, attack: 2.0 },
                health_loss: Default::default(),
                degradation: Default::default(),
                delay_hours: 3.25,
            },
        );
        let text = describe(&result, &v);
        assert!(text.contains("Osprey"));
        assert!(text.contains("3.2") || text.contains("3.3"));
    }
}
