//! Crew skills, encounter experience, and progression.
//!
//! Skills (piloting, negotiation, combat, engineering) run 0–100. Every
//! resolved encounter becomes an [`ExperienceEvent`]; the default
//! [`SkillTrainer`] turns that event into experience for the crew who took
//! part and reports any level-ups.
//!
//! ```
//! use starwake_logic::skills::{
//!     apply_experience, SkillCategory, SkillProfile, SkillProgressionConfig,
//! };
//!
//! let mut profile = SkillProfile::new(40.0, 20.0, 10.0, 0.0);
//! let config = SkillProgressionConfig::default();
//! let new_level = apply_experience(&mut profile, SkillCategory::Piloting, 100.0, &config);
//! assert!(new_level > 40.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::collaborators::Experience;
use crate::constants::SKILL_MAX;
use crate::encounter::{EncounterKind, EncounterResult};
use crate::vessel::{CrewId, Job, Vessel, VesselId};

/// All skill categories a crew member can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Piloting,
    Negotiation,
    Combat,
    Engineering,
}

impl SkillCategory {
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Piloting => "piloting",
            SkillCategory::Negotiation => "negotiation",
            SkillCategory::Combat => "combat",
            SkillCategory::Engineering => "engineering",
        }
    }
}

/// Skill levels plus accumulated experience per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub piloting: f64,
    pub negotiation: f64,
    pub combat: f64,
    pub engineering: f64,
    #[serde(default)]
    pub xp_piloting: f64,
    #[serde(default)]
    pub xp_negotiation: f64,
    #[serde(default)]
    pub xp_combat: f64,
    #[serde(default)]
    pub xp_engineering: f64,
}

impl SkillProfile {
    pub fn new(piloting: f64, negotiation: f64, combat: f64, engineering: f64) -> Self {
        Self {
            piloting: piloting.clamp(0.0, SKILL_MAX),
            negotiation: negotiation.clamp(0.0, SKILL_MAX),
            combat: combat.clamp(0.0, SKILL_MAX),
            engineering: engineering.clamp(0.0, SKILL_MAX),
            xp_piloting: 0.0,
            xp_negotiation: 0.0,
            xp_combat: 0.0,
            xp_engineering: 0.0,
        }
    }

    pub fn get(&self, cat: SkillCategory) -> f64 {
        match cat {
            SkillCategory::Piloting => self.piloting,
            SkillCategory::Negotiation => self.negotiation,
            SkillCategory::Combat => self.combat,
            SkillCategory::Engineering => self.engineering,
        }
    }

    pub fn xp(&self, cat: SkillCategory) -> f64 {
        match cat {
            SkillCategory::Piloting => self.xp_piloting,
            SkillCategory::Negotiation => self.xp_negotiation,
            SkillCategory::Combat => self.xp_combat,
            SkillCategory::Engineering => self.xp_engineering,
        }
    }

    /// Whole level, one per ten skill points.
    pub fn level(&self, cat: SkillCategory) -> u8 {
        (self.get(cat) / 10.0).floor() as u8
    }

    fn set(&mut self, cat: SkillCategory, value: f64) {
        let v = value.clamp(0.0, SKILL_MAX);
        match cat {
            SkillCategory::Piloting => self.piloting = v,
            SkillCategory::Negotiation => self.negotiation = v,
            SkillCategory::Combat => self.combat = v,
            SkillCategory::Engineering => self.engineering = v,
        }
    }

    fn add_xp(&mut self, cat: SkillCategory, xp: f64) {
        match cat {
            SkillCategory::Piloting => self.xp_piloting += xp,
            SkillCategory::Negotiation => self.xp_negotiation += xp,
            SkillCategory::Combat => self.xp_combat += xp,
            SkillCategory::Engineering => self.xp_engineering += xp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProgressionConfig {
    /// Skill points gained per experience point.
    pub gain_per_xp: f64,
    /// Skill level above which diminishing returns kick in.
    pub diminishing_threshold: f64,
    pub skill_cap: f64,
}

impl Default for SkillProgressionConfig {
    fn default() -> Self {
        Self {
            gain_per_xp: 0.05,
            diminishing_threshold: 80.0,
            skill_cap: SKILL_MAX,
        }
    }
}

/// Apply `xp` to a skill and return the new skill value.
///
/// Gain is `xp × gain_per_xp × diminishing`, where diminishing falls
/// linearly from 1.0 at the threshold to 0.01 at the cap.
pub fn apply_experience(
    profile: &mut SkillProfile,
    skill: SkillCategory,
    xp: f64,
    config: &SkillProgressionConfig,
) -> f64 {
    let xp = xp.max(0.0);
    profile.add_xp(skill, xp);

    let current = profile.get(skill);
    if current >= config.skill_cap {
        return current;
    }

    let diminishing = if current > config.diminishing_threshold {
        let excess = current - config.diminishing_threshold;
        let range = config.skill_cap - config.diminishing_threshold;
        if range > 0.0 {
            1.0 - (excess / range)
        } else {
            0.0
        }
    } else {
        1.0
    };

    let gain = xp * config.gain_per_xp * diminishing.max(0.01);
    let new_level = (current + gain).min(config.skill_cap);
    profile.set(skill, new_level);
    new_level
}

/// Notice that a crew member crossed into a new skill level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub crew_id: CrewId,
    pub crew_name: String,
    pub skill: SkillCategory,
    pub level: u8,
}

/// What the experience subsystem is told about a resolved encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEvent {
    pub vessel_id: VesselId,
    pub kind: EncounterKind,
    pub threat_level: u8,
    pub negotiator: Option<CrewId>,
}

impl ExperienceEvent {
    pub fn from_result(result: &EncounterResult) -> Self {
        Self {
            vessel_id: result.vessel_id(),
            kind: result.kind(),
            threat_level: result.threat_level(),
            negotiator: result.outcome().negotiator(),
        }
    }

    /// Skill trained and experience per participant.
    pub fn award(&self) -> (SkillCategory, f64) {
        let threat = f64::from(self.threat_level);
        match self.kind {
            EncounterKind::Evaded => (SkillCategory::Piloting, threat * 10.0),
            EncounterKind::Negotiated => (SkillCategory::Negotiation, threat * 15.0),
            EncounterKind::Fled => (SkillCategory::Piloting, threat * 5.0),
            EncounterKind::Victory => (SkillCategory::Combat, threat * 20.0),
            EncounterKind::Harassment => (SkillCategory::Combat, threat * 10.0),
            EncounterKind::Boarding => (SkillCategory::Combat, threat * 5.0),
        }
    }

    /// Crew who earn experience from this event.
    pub fn participants(&self, vessel: &Vessel) -> Vec<CrewId> {
        let active = vessel.active_crew();
        match self.kind {
            EncounterKind::Evaded | EncounterKind::Fled => {
                active.filter(|c| c.job == Job::Helm).map(|c| c.id).collect()
            }
            EncounterKind::Negotiated => self.negotiator.into_iter().collect(),
            EncounterKind::Victory | EncounterKind::Harassment => active
                .filter(|c| matches!(c.job, Job::Armory | Job::PointDefense))
                .map(|c| c.id)
                .collect(),
            EncounterKind::Boarding => active.map(|c| c.id).collect(),
        }
    }
}

/// Default experience subsystem: trains the participants' skills in place.
#[derive(Debug, Clone, Default)]
pub struct SkillTrainer {
    pub config: SkillProgressionConfig,
}

impl Experience for SkillTrainer {
    fn award_event(&mut self, vessel: &mut Vessel, event: &ExperienceEvent) -> Vec<LevelUp> {
        let (skill, xp) = event.award();
        let mut level_ups = Vec::new();

        for crew_id in event.participants(vessel) {
            let Some(crew) = vessel.crew_member_mut(crew_id) else {
                continue;
            };
            let before = crew.skills.level(skill);
            apply_experience(&mut crew.skills, skill, xp, &self.config);
            let after = crew.skills.level(skill);
            if after > before {
                level_ups.push(LevelUp {
                    crew_id,
                    crew_name: crew.name.clone(),
                    skill,
                    level: after,
                });
            }
        }

        level_ups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::{CrewMember, CrewRole};

    fn crew_vessel() -> Vessel {
        let mut v = Vessel::new(7, "Heron", 40_000.0);
        v.crew.push(CrewMember::new(
            1,
            "Ilsa",
            CrewRole::Captain,
            Job::Unassigned,
            SkillProfile::new(30.0, 58.0, 20.0, 10.0),
        ));
        v.crew.push(CrewMember::new(
            2,
            "Pike",
            CrewRole::Crew,
            Job::Helm,
            SkillProfile::new(49.0, 0.0, 0.0, 0.0),
        ));
        v.crew.push(CrewMember::new(
            3,
            "Rook",
            CrewRole::Crew,
            Job::Armory,
            SkillProfile::new(0.0, 0.0, 39.5, 0.0),
        ));
        v.crew.push(CrewMember::new(
            4,
            "Wren",
            CrewRole::Crew,
            Job::Engineering,
            SkillProfile::new(0.0, 0.0, 10.0, 60.0),
        ));
        v
    }

    fn event(kind: EncounterKind, negotiator: Option<CrewId>) -> ExperienceEvent {
        ExperienceEvent {
            vessel_id: 7,
            kind,
            threat_level: 5,
            negotiator,
        }
    }

    #[test]
    fn profile_getters_and_levels() {
        let p = SkillProfile::new(45.0, 0.0, 99.0, 120.0);
        assert_eq!(p.level(SkillCategory::Piloting), 4);
        assert_eq!(p.level(SkillCategory::Combat), 9);
        assert_eq!(p.get(SkillCategory::Engineering), 100.0);
        assert_eq!(p.xp(SkillCategory::Piloting), 0.0);
    }

    #[test]
    fn experience_gain_basic() {
        let mut p = SkillProfile::new(40.0, 0.0, 0.0, 0.0);
        let config = SkillProgressionConfig::default();
        let new = apply_experience(&mut p, SkillCategory::Piloting, 100.0, &config);
        assert!((new - 45.0).abs() < 1e-9);
        assert!((p.xp(SkillCategory::Piloting) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn diminishing_returns_above_threshold() {
        let config = SkillProgressionConfig::default();
        let mut high = SkillProfile::new(90.0, 0.0, 0.0, 0.0);
        let mut low = SkillProfile::new(50.0, 0.0, 0.0, 0.0);
        let gain_high = apply_experience(&mut high, SkillCategory::Piloting, 100.0, &config) - 90.0;
        let gain_low = apply_experience(&mut low, SkillCategory::Piloting, 100.0, &config) - 50.0;
        assert!(gain_high < gain_low);
    }

    #[test]
    fn skill_never_exceeds_cap() {
        let config = SkillProgressionConfig::default();
        let mut p = SkillProfile::new(99.0, 0.0, 0.0, 0.0);
        let result = apply_experience(&mut p, SkillCategory::Piloting, 1e6, &config);
        assert!(result <= 100.0);
    }

    #[test]
    fn evasion_trains_helm() {
        let mut v = crew_vessel();
        let mut trainer = SkillTrainer::default();
        let ups = trainer.award_event(&mut v, &event(EncounterKind::Evaded, None));
        // 5 × 10 xp × 0.05 = 2.5 points: 49 → 51.5 crosses level 5
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].crew_id, 2);
        assert_eq!(ups[0].skill, SkillCategory::Piloting);
        assert_eq!(ups[0].level, 5);
        assert_eq!(v.crew_member(1).unwrap().skills.xp(SkillCategory::Piloting), 0.0);
    }

    #[test]
    fn negotiation_trains_only_negotiator() {
        let mut v = crew_vessel();
        let mut trainer = SkillTrainer::default();
        let ups = trainer.award_event(&mut v, &event(EncounterKind::Negotiated, Some(1)));
        // 75 xp → 3.75 points: 58 → 61.75
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].level, 6);
        assert!(v.crew_member(2).unwrap().skills.xp(SkillCategory::Negotiation) == 0.0);
    }

    #[test]
    fn victory_trains_gunners() {
        let mut v = crew_vessel();
        let mut trainer = SkillTrainer::default();
        let ups = trainer.award_event(&mut v, &event(EncounterKind::Victory, None));
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].crew_name, "Rook");
        assert_eq!(v.crew_member(4).unwrap().skills.xp(SkillCategory::Combat), 0.0);
    }

    #[test]
    fn boarding_trains_everyone_alive() {
        let mut v = crew_vessel();
        v.crew[3].is_alive = false;
        let participants = event(EncounterKind::Boarding, None).participants(&v);
        assert_eq!(participants, vec![1, 2, 3]);
    }

    #[test]
    fn award_table() {
        assert_eq!(event(EncounterKind::Fled, None).award(), (SkillCategory::Piloting, 25.0));
        assert_eq!(event(EncounterKind::Harassment, None).award(), (SkillCategory::Combat, 50.0));
        assert_eq!(event(EncounterKind::Boarding, None).award(), (SkillCategory::Combat, 25.0));
    }

    #[test]
    fn category_labels() {
        assert_eq!(SkillCategory::Piloting.label(), "piloting");
        assert_eq!(SkillCategory::Combat.label(), "combat");
    }
}
