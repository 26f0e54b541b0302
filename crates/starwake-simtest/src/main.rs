//! Starwake Headless Encounter Harness
//!
//! Validates the encounter logic and bundled data without a game host.
//! Runs entirely in-process: seeded randomness, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p starwake-simtest
//!   cargo run -p starwake-simtest -- --verbose --seed 7 --ticks 2000
//!   cargo run -p starwake-simtest -- --tuning my_tuning.json --json

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use starwake_logic::catalog::{EquipmentCatalog, StaticCatalog};
use starwake_logic::config::{validate_tuning, EncounterTuning, TuningError};
use starwake_logic::constants::{items, DEGRADATION_MAX, HEALTH_MAX, THREAT_MAX, THREAT_MIN};
use starwake_logic::encounter::threat::assess_threat;
use starwake_logic::encounter::{
    determine_combat_outcome, CombatOutcome, EncounterKind, EncounterResult,
};
use starwake_logic::random::RngSource;
use starwake_logic::skills::SkillProfile;
use starwake_logic::vessel::{
    CargoItem, CrewMember, CrewRole, EquipmentInstance, FlightPlan, Job, Vessel,
};
use starwake_logic::world::{EncounterStats, WorldState};
use starwake_logic::{EncounterEngine, TickScheduler};

// ── Bundled data (same JSON the game host ships) ────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/equipment_catalog.json");

const STARTING_CREDITS: u64 = 5_000;

#[derive(Parser, Debug)]
#[command(name = "starwake-simtest", about = "Headless encounter harness")]
struct Args {
    /// Print every check and per-section detail
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Seed for the encounter and scheduler generators
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ticks (hours) to run in the live and catch-up sections
    #[arg(long, default_value_t = 1_000)]
    ticks: u32,

    /// Tuning override (partial JSON; missing fields keep defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Equipment catalog override
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print a JSON summary after the report
    #[arg(long)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    seed: u64,
    ticks: u32,
    passed: usize,
    failed: usize,
    live: Option<EncounterStats>,
    catch_up: Option<EncounterStats>,
    failures: Vec<&'a TestResult>,
}

fn main() {
    let args = Args::parse();
    println!("=== Starwake Encounter Harness ===\n");

    let mut results = Vec::new();

    // 1. Equipment catalog
    let catalog = load_catalog(&args, &mut results);

    // 2. Tuning validation
    let tuning = load_tuning(&args, &mut results);

    // 3. Threat assessment sweep
    results.extend(validate_threat(&tuning, args.verbose));

    // 4. Outcome classifier sweep
    results.extend(validate_classifier(&tuning, args.verbose));

    // 5. Live fleet run
    let (live_results, live_stats) = run_fleet(&args, &tuning, &catalog, false);
    results.extend(live_results);

    // 6. Catch-up fleet run
    let (catch_up_results, catch_up_stats) = run_fleet(&args, &tuning, &catalog, true);
    results.extend(catch_up_results);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if args.json {
        let summary = Summary {
            seed: args.seed,
            ticks: args.ticks,
            passed,
            failed,
            live: live_stats,
            catch_up: catch_up_stats,
            failures: results.iter().filter(|r| !r.passed).collect(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("could not serialize summary: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Equipment Catalog ────────────────────────────────────────────────

fn load_catalog(args: &Args, results: &mut Vec<TestResult>) -> StaticCatalog {
    println!("--- Equipment Catalog ---");

    let source = match &args.catalog {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                results.push(TestResult::check(
                    "catalog_read",
                    false,
                    format!("{}: {}", path.display(), e),
                ));
                return StaticCatalog::standard();
            }
        },
        None => CATALOG_JSON.to_string(),
    };

    let catalog = match StaticCatalog::from_json(&source) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check("catalog_parse", false, e.to_string()));
            return StaticCatalog::standard();
        }
    };
    results.push(TestResult::check(
        "catalog_parse",
        true,
        format!("{} items loaded", catalog.len()),
    ));

    let negative: Vec<_> = catalog
        .iter()
        .filter(|d| d.weight_kg < 0.0 || d.attack_score < 0.0 || d.defense_bonus < 0.0)
        .map(|d| d.id.as_str())
        .collect();
    results.push(TestResult::check(
        "catalog_non_negative_stats",
        negative.is_empty(),
        if negative.is_empty() {
            "all weights and scores non-negative".into()
        } else {
            format!("negative stats: {}", negative.join(", "))
        },
    ));

    // Items the fleet below relies on
    let required = [
        items::PD_TURRET,
        items::FLAK_BATTERY,
        items::SHIELD_EMITTER,
        items::SENSOR_JAMMER,
        items::BOARDING_RIFLE,
        items::BOARDING_ARMOR,
        items::ORE_CRATE,
    ];
    let missing: Vec<_> = required
        .iter()
        .filter(|id| catalog.lookup(id).is_none())
        .collect();
    results.push(TestResult::check(
        "catalog_required_items",
        missing.is_empty(),
        if missing.is_empty() {
            format!("{} required items present", required.len())
        } else {
            format!("missing: {:?}", missing)
        },
    ));

    // Bundled file and built-in table must agree
    if args.catalog.is_none() {
        let builtin = StaticCatalog::standard();
        let drift: Vec<_> = builtin
            .iter()
            .filter(|d| catalog.lookup(&d.id) != Some(*d))
            .map(|d| d.id.as_str())
            .collect();
        results.push(TestResult::check(
            "catalog_matches_builtin",
            drift.is_empty() && builtin.len() == catalog.len(),
            if drift.is_empty() {
                "bundled JSON matches built-in catalog".into()
            } else {
                format!("differs: {}", drift.join(", "))
            },
        ));
    }

    if args.verbose {
        let mut defs: Vec<_> = catalog.iter().collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        for d in defs {
            println!(
                "    {:18} {:?} {:>7.0} kg  atk {:>4.0}  def {:>4.0}",
                d.id, d.class, d.weight_kg, d.attack_score, d.defense_bonus
            );
        }
    }

    catalog
}

// ── 2. Tuning ───────────────────────────────────────────────────────────

fn load_tuning(args: &Args, results: &mut Vec<TestResult>) -> EncounterTuning {
    println!("--- Tuning ---");

    let defaults = validate_tuning(&EncounterTuning::default());
    results.push(TestResult::check(
        "tuning_defaults_valid",
        defaults.is_empty(),
        describe_errors(&defaults, "default tuning validates clean"),
    ));

    // The validator must catch an inverted band
    let mut broken = EncounterTuning::default();
    broken.steal_rate_min = 0.5;
    broken.steal_rate_max = 0.1;
    let caught = validate_tuning(&broken)
        .iter()
        .any(|e| matches!(e, TuningError::InvertedBand { .. }));
    results.push(TestResult::check(
        "tuning_rejects_inverted_band",
        caught,
        "steal_rate 0.5..0.1 reported".into(),
    ));

    let Some(path) = &args.tuning else {
        return EncounterTuning::default();
    };
    let tuning = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| EncounterTuning::from_json(&text).map_err(|e| e.to_string()))
    {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult::check(
                "tuning_override_load",
                false,
                format!("{}: {}", path.display(), e),
            ));
            return EncounterTuning::default();
        }
    };
    let errors = validate_tuning(&tuning);
    results.push(TestResult::check(
        "tuning_override_valid",
        errors.is_empty(),
        describe_errors(&errors, &format!("{} validates clean", path.display())),
    ));
    tuning
}

fn describe_errors(errors: &[TuningError], ok: &str) -> String {
    if errors.is_empty() {
        ok.to_string()
    } else {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ── 3. Threat Assessment ────────────────────────────────────────────────

fn validate_threat(tuning: &EncounterTuning, verbose: bool) -> Vec<TestResult> {
    println!("--- Threat Assessment ---");
    let mut results = Vec::new();

    let mut out_of_range = 0;
    let mut histogram = [0u32; THREAT_MAX as usize + 1];
    for step in 0..=200 {
        let distance = f64::from(step) * 1_000_000.0;
        for cargo_step in 0..=12 {
            let cargo = f64::from(cargo_step) * 1_000.0;
            let t = assess_threat(distance, cargo, tuning);
            if !(THREAT_MIN..=THREAT_MAX).contains(&t) {
                out_of_range += 1;
            } else {
                histogram[t as usize] += 1;
            }
        }
    }
    results.push(TestResult::check(
        "threat_in_range",
        out_of_range == 0,
        format!("{} of 2613 samples outside {}..={}", out_of_range, THREAT_MIN, THREAT_MAX),
    ));

    let origin = assess_threat(0.0, 0.0, tuning);
    results.push(TestResult::check(
        "threat_origin_minimum",
        origin == THREAT_MIN,
        format!("threat {} at departure", origin),
    ));

    let midway = assess_threat(55_000_000.0, 0.0, tuning);
    results.push(TestResult::check(
        "threat_55m_km",
        tuning.position_divisor_km != 1e7 || midway == 5,
        format!("threat {} at 55,000,000 km", midway),
    ));

    let far = assess_threat(1e12, 0.0, tuning);
    results.push(TestResult::check(
        "threat_distance_cap",
        far == tuning.base_threat_cap.clamp(THREAT_MIN, THREAT_MAX),
        format!("threat {} with no cargo at 1e12 km", far),
    ));

    if verbose {
        println!("  Threat histogram:");
        for (level, count) in histogram.iter().enumerate().skip(1) {
            println!("    {:2}: {}", level, count);
        }
    }

    results
}

// ── 4. Outcome Classifier ───────────────────────────────────────────────

fn validate_classifier(tuning: &EncounterTuning, _verbose: bool) -> Vec<TestResult> {
    println!("--- Outcome Classifier ---");
    let mut results = Vec::new();

    let mut boarded_in_catch_up = 0;
    let mut impure = 0;
    for d in 0..=200 {
        for a in 1..=100 {
            let defense = f64::from(d);
            let attack = f64::from(a);
            let first = determine_combat_outcome(defense, attack, true, tuning);
            if first == CombatOutcome::Boarding {
                boarded_in_catch_up += 1;
            }
            if first != determine_combat_outcome(defense, attack, true, tuning) {
                impure += 1;
            }
        }
    }
    results.push(TestResult::check(
        "classifier_catch_up_never_boards",
        boarded_in_catch_up == 0,
        format!("{} boardings in 20,100 catch-up classifications", boarded_in_catch_up),
    ));
    results.push(TestResult::check(
        "classifier_deterministic",
        impure == 0,
        "identical inputs give identical outcomes".into(),
    ));

    let decisive = determine_combat_outcome(100.0, 60.0, false, tuning);
    results.push(TestResult::check(
        "classifier_decisive_victory",
        decisive == CombatOutcome::Victory,
        format!("100 vs 60 → {:?}", decisive),
    ));

    let toothless = determine_combat_outcome(0.0, 0.0, false, tuning);
    results.push(TestResult::check(
        "classifier_zero_attack",
        toothless == CombatOutcome::Victory,
        format!("0 vs 0 → {:?}", toothless),
    ));

    results
}

// ── 5/6. Fleet runs ─────────────────────────────────────────────────────

fn crew(id: u32, name: &str, role: CrewRole, job: Job, p: f64, n: f64, c: f64) -> CrewMember {
    CrewMember::new(id, name, role, job, SkillProfile::new(p, n, c, 20.0))
}

fn plan(destination: &str, hours: f64, velocity: f64) -> Option<FlightPlan> {
    Some(FlightPlan::new(destination, hours, velocity))
}

/// Four loadouts from defenceless hauler to gunship.
fn build_fleet(ticks: u32) -> Vec<Vessel> {
    let long_haul = f64::from(ticks) * 2.0;
    let mut fleet = Vec::new();

    let mut hauler = Vessel::new(1, "Dray", 60_000.0);
    hauler.flight_plan = plan("Mars Orbital", long_haul, 15.0);
    hauler.cargo.push(CargoItem::new(items::ORE_CRATE, 18));
    hauler.crew.push(crew(1, "Avatar", CrewRole::Avatar, Job::Engineering, 30.0, 30.0, 30.0));
    hauler.crew.push(crew(2, "Bram", CrewRole::Crew, Job::Helm, 40.0, 10.0, 10.0));
    fleet.push(hauler);

    let mut trader = Vessel::new(2, "Meridian", 35_000.0);
    trader.flight_plan = plan("Ceres Exchange", long_haul, 35.0);
    trader.equipment.push(EquipmentInstance::new(items::SENSOR_JAMMER));
    trader.equipment.push(EquipmentInstance::new(items::DEFLECTOR_ARRAY));
    trader.crew.push(crew(3, "Sable", CrewRole::Captain, Job::Unassigned, 60.0, 75.0, 20.0));
    trader.crew.push(crew(4, "Quill", CrewRole::Officer, Job::Helm, 65.0, 50.0, 15.0));
    trader.crew.push(crew(5, "Tobin", CrewRole::Crew, Job::PointDefense, 10.0, 10.0, 35.0));
    fleet.push(trader);

    let mut gunship = Vessel::new(3, "Halberd", 50_000.0);
    gunship.flight_plan = plan("Jovian Picket", long_haul, 25.0);
    gunship.equipment.push(EquipmentInstance::new(items::FLAK_BATTERY));
    gunship.equipment.push(EquipmentInstance::new(items::PD_TURRET));
    gunship.equipment.push(EquipmentInstance::new(items::SHIELD_EMITTER));
    gunship.crew.push(crew(6, "Voss", CrewRole::Captain, Job::Unassigned, 50.0, 30.0, 70.0));
    gunship.crew.push(crew(7, "Ria", CrewRole::Crew, Job::PointDefense, 20.0, 10.0, 80.0));
    gunship.crew.push(
        crew(8, "Holt", CrewRole::Crew, Job::Armory, 10.0, 10.0, 65.0)
            .with_equipped(items::BOARDING_RIFLE)
            .with_equipped(items::BOARDING_ARMOR),
    );
    fleet.push(gunship);

    // Short hop to exercise arrival handling
    let mut shuttle = Vessel::new(4, "Gnat", 8_000.0);
    shuttle.flight_plan = plan("Phobos", 24.0, 10.0);
    shuttle.crew.push(crew(9, "Pell", CrewRole::Crew, Job::Helm, 30.0, 10.0, 10.0));
    fleet.push(shuttle);

    fleet
}

fn run_fleet(
    args: &Args,
    tuning: &EncounterTuning,
    catalog: &StaticCatalog,
    is_catch_up: bool,
) -> (Vec<TestResult>, Option<EncounterStats>) {
    let label = if is_catch_up { "catch_up" } else { "live" };
    let label = if is_catch_up { "Catch-up" } else { "Live" };
    println!("--- {} run ({} ticks) ---", label, args.ticks);
    let mut results = Vec::new();

    let engine = EncounterEngine::standard()
        .with_tuning(tuning.clone())
        .with_catalog(catalog.clone())
        .with_rng(RngSource(ChaCha8Rng::seed_from_u64(args.seed)));
    let mut scheduler = TickScheduler::new(tuning)
        .with_rng(RngSource(ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1))));
    scheduler.set_encounter_resolver(Box::new(engine));

    let mut fleet = build_fleet(args.ticks);
    let mut world = WorldState::new(STARTING_CREDITS);

    let encounters: Vec<EncounterResult> = if is_catch_up {
        scheduler.catch_up(&mut fleet, &mut world, args.ticks, 1.0)
    } else {
        (0..args.ticks)
            .flat_map(|_| scheduler.tick(&mut fleet, &mut world, 1.0, false))
            .collect()
    };

    let stats = world.encounter_stats.clone();
    let recorded = stats.as_ref().map_or(0, |s| s.total());
    results.push(TestResult::check(
        &format!("{}_stats_match", label),
        recorded as usize == encounters.len(),
        format!("{} encounters resolved, {} recorded", encounters.len(), recorded),
    ));

    results.push(TestResult::check(
        &format!("{}_encounters_happen", label),
        args.ticks < 200 || !encounters.is_empty(),
        format!("{} encounters over {} ticks", encounters.len(), args.ticks),
    ));

    let bad_threat = encounters
        .iter()
        .filter(|r| !(THREAT_MIN..=THREAT_MAX).contains(&r.threat_level()))
        .count();
    results.push(TestResult::check(
        &format!("{}_threat_in_range", label),
        bad_threat == 0,
        format!("{} results outside threat range", bad_threat),
    ));

    results.push(TestResult::check(
        &format!("{}_credits_bounded", label),
        world.credits <= STARTING_CREDITS + world.lifetime_earned,
        format!("{} credits, {} earned", world.credits, world.lifetime_earned),
    ));

    let worn_out_of_range = fleet
        .iter()
        .flat_map(|v| v.equipment.iter())
        .filter(|e| !(0.0..=DEGRADATION_MAX).contains(&e.degradation))
        .count();
    results.push(TestResult::check(
        &format!("{}_degradation_in_range", label),
        worn_out_of_range == 0,
        format!("{} items outside 0..=100", worn_out_of_range),
    ));

    let bad_health = fleet
        .iter()
        .flat_map(|v| v.crew.iter())
        .filter(|c| !(0.0..=HEALTH_MAX).contains(&c.health))
        .count();
    let avatar_ok = fleet
        .iter()
        .flat_map(|v| v.crew.iter())
        .filter(|c| c.role == CrewRole::Avatar)
        .all(|c| c.is_alive && c.health >= 1.0);
    results.push(TestResult::check(
        &format!("{}_crew_health", label),
        bad_health == 0 && avatar_ok,
        format!("{} crew outside 0..=100, avatar alive={}", bad_health, avatar_ok),
    ));

    let arrived = fleet.iter().find(|v| v.id == 4).map_or(false, |v| v.flight_plan.is_none());
    results.push(TestResult::check(
        &format!("{}_short_hop_arrives", label),
        args.ticks < 24 || arrived,
        format!("shuttle arrived={}", arrived),
    ));

    if is_catch_up {
        let boarded = encounters
            .iter()
            .filter(|r| r.kind() == EncounterKind::Boarding)
            .count();
        results.push(TestResult::check(
            "catch_up_never_boards",
            boarded == 0,
            format!("{} boardings while catching up", boarded),
        ));
    }

    if args.verbose {
        if let Some(s) = &stats {
            println!("  Outcomes:");
            for kind in EncounterKind::ALL {
                println!("    {:10}: {}", kind.label(), s.count(kind));
            }
        }
        println!("  Credits: {} (earned {})", world.credits, world.lifetime_earned);
        for v in &fleet {
            let dead = v.crew.iter().filter(|c| !c.is_alive).count();
            println!("    {:9} crew lost {}/{}", v.name, dead, v.crew.len());
        }
    }

    (results, stats)
}
