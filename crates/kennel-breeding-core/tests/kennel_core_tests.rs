//! End-to-end tests through the FFI-facing `KennelCore` object.

use kennel_breeding_core::{open_database, open_database_in_memory, open_database_with_policy, KennelError};

#[test]
fn test_heat_cycle_flow() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;

    core.log_heat_cycle(dam.id.clone(), "2024-01-01".into())?;
    core.end_heat_cycle(dam.id.clone(), "2024-01-21".into())?;
    core.log_heat_cycle(dam.id.clone(), "2024-07-01".into())?;

    let cycles = core.list_heat_cycles(dam.id.clone())?;
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0].start_date, "2024-07-01");
    assert_eq!(cycles[0].sequence, 2);
    assert_eq!(cycles[1].cycle_length_days, None);
    assert_eq!(cycles[1].heat_duration_days, Some(21));

    let summary = core.reproductive_summary(dam.id.clone(), Some("2024-07-12".into()))?;
    assert_eq!(summary.status, "In heat");
    assert_eq!(summary.day_of_cycle, Some(12));
    assert_eq!(summary.stage.as_deref(), Some("Estrus"));
    assert_eq!(summary.fertility.as_deref(), Some("peak"));
    assert_eq!(summary.fertility_window_start.as_deref(), Some("2024-07-10"));
    assert_eq!(summary.fertility_window_end.as_deref(), Some("2024-07-15"));
    // 182-day gap between starts
    assert_eq!(summary.average_cycle_length, Some(182));
    assert_eq!(summary.next_heat_date.as_deref(), Some("2024-12-30"));
    Ok(())
}

#[test]
fn test_single_closed_cycle_uses_default_length() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;

    core.log_heat_cycle(dam.id.clone(), "2024-01-01".into())?;
    core.end_heat_cycle(dam.id.clone(), "2024-01-21".into())?;

    let summary = core.reproductive_summary(dam.id.clone(), Some("2024-03-01".into()))?;
    assert_eq!(summary.status, "Not in heat");
    assert_eq!(summary.average_cycle_length, None);
    assert_eq!(summary.next_heat_date.as_deref(), Some("2024-06-29"));
    assert_eq!(summary.days_until_next_heat, Some(120));
    Ok(())
}

#[test]
fn test_second_open_cycle_rejected() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;
    core.log_heat_cycle(dam.id.clone(), "2024-01-01".into())?;

    let result = core.log_heat_cycle(dam.id.clone(), "2024-07-01".into());
    assert!(matches!(result, Err(KennelError::InvalidInput(_))));
    Ok(())
}

#[test]
fn test_male_cannot_log_heat() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let sire = core.create_animal("Atlas".into(), "male".into())?;

    let result = core.log_heat_cycle(sire.id, "2024-01-01".into());
    assert!(matches!(result, Err(KennelError::InvalidInput(_))));
    Ok(())
}

#[test]
fn test_pregnancy_lifecycle() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;
    let sire = core.create_animal("Atlas".into(), "male".into())?;

    let cycle = core.log_heat_cycle(dam.id.clone(), "2024-02-20".into())?;
    let breeding = core.log_breeding(
        dam.id.clone(),
        sire.id.clone(),
        "2024-03-01".into(),
        "natural".into(),
    )?;
    assert_eq!(breeding.estimated_due_date, "2024-05-03");
    assert_eq!(breeding.heat_cycle_id, Some(cycle.id));

    core.confirm_pregnancy(breeding.id.clone(), Some("2024-03-28".into()))?;
    let again = core.confirm_pregnancy(breeding.id.clone(), None);
    assert!(matches!(again, Err(KennelError::InvalidInput(_))));
    assert_eq!(core.list_pregnancies(dam.id.clone())?.len(), 1);

    let summary = core.reproductive_summary(dam.id.clone(), Some("2024-04-01".into()))?;
    assert_eq!(summary.status, "Pregnant");
    assert_eq!(summary.gestation_days, Some(31));
    assert_eq!(summary.estimated_due_date.as_deref(), Some("2024-05-03"));
    assert!(summary.next_heat_date.is_none());

    // Invalid litter is rejected and nothing changes
    let bad = core.complete_pregnancy(dam.id.clone(), "2024-05-02".into(), 3, 4);
    assert!(matches!(bad, Err(KennelError::InvalidInput(_))));
    assert!(core.get_animal(dam.id.clone())?.unwrap().is_pregnant);

    let finished = core.complete_pregnancy(dam.id.clone(), "2024-05-02".into(), 6, 6)?;
    assert_eq!(finished.actual_whelp_date.as_deref(), Some("2024-05-02"));
    assert_eq!(finished.puppies_alive, Some(6));

    let after = core.get_animal(dam.id.clone())?.unwrap();
    assert!(!after.is_pregnant);
    assert!(after.tie_date.is_none());

    let history = core.list_pregnancies(dam.id.clone())?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].breeding_record_id, breeding.id);
    assert_eq!(history[0].puppies_born, Some(6));
    Ok(())
}

#[test]
fn test_pairing_report_from_store() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;
    let sire = core.create_animal("Atlas".into(), "male".into())?;

    core.record_hereditary_marker(sire.id.clone(), "vWD".into(), "carrier".into(), Some("N/vWD1".into()), Some("2023-11-02".into()))?;
    core.record_hereditary_marker(dam.id.clone(), "vWD".into(), "carrier".into(), None, None)?;
    core.record_hereditary_marker(sire.id.clone(), "EIC".into(), "clear".into(), None, None)?;
    core.record_hereditary_marker(dam.id.clone(), "EIC".into(), "clear".into(), None, None)?;

    let report = core.pairing_report(sire.id.clone(), dam.id.clone(), None)?;
    assert_eq!(report.coi, 4.2);
    assert_eq!(report.health_warnings.len(), 1);
    assert_eq!(report.health_warnings[0].risk_level, "critical");
    assert_eq!(report.compatible_conditions, vec!["EIC".to_string()]);
    assert_eq!(report.score, 70);
    assert_eq!(report.tier, "good");
    assert_eq!(report.recommendation, "Recommended");

    let json = core.pairing_report_json(sire.id.clone(), dam.id.clone(), Some(13.0))?;
    assert!(json.contains("High Inbreeding"));
    Ok(())
}

#[test]
fn test_invalid_inputs_surface_as_errors() -> anyhow::Result<()> {
    let core = open_database_in_memory()?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;

    assert!(matches!(
        core.log_heat_cycle(dam.id.clone(), "01/02/2024".into()),
        Err(KennelError::InvalidInput(_))
    ));
    assert!(matches!(
        core.create_animal("Blob".into(), "unknown".into()),
        Err(KennelError::InvalidInput(_))
    ));
    assert!(matches!(
        core.reproductive_summary("missing".into(), None),
        Err(KennelError::NotFound(_))
    ));
    assert!(matches!(
        core.pairing_report(dam.id.clone(), dam.id.clone(), None),
        Err(KennelError::InvalidInput(_))
    ));
    Ok(())
}

#[test]
fn test_policy_override_and_on_disk_store() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("kennel.db").to_string_lossy().to_string();

    let core = open_database_with_policy(path.clone(), r#"{"default_cycle_length_days": 200}"#.into())?;
    let dam = core.create_animal("Juniper".into(), "female".into())?;
    core.log_heat_cycle(dam.id.clone(), "2024-01-01".into())?;
    let summary = core.reproductive_summary(dam.id.clone(), Some("2024-03-01".into()))?;
    assert_eq!(summary.next_heat_date.as_deref(), Some("2024-07-19"));
    drop(core);

    // Reopen with defaults: same records, default projection
    let core = open_database(path)?;
    let summary = core.reproductive_summary(dam.id.clone(), Some("2024-03-01".into()))?;
    assert_eq!(summary.next_heat_date.as_deref(), Some("2024-06-29"));

    assert!(matches!(
        open_database_with_policy(dir.path().join("other.db").to_string_lossy().to_string(), r#"{"gestation_days": -1}"#.into()),
        Err(KennelError::InvalidInput(_))
    ));
    Ok(())
}

#[test]
fn test_oversized_policy_rejected_at_open() {
    let result = open_database_with_policy(
        ":memory:".into(),
        r#"{"default_cycle_length_days": 200000000000000}"#.into(),
    );
    assert!(matches!(result, Err(KennelError::InvalidInput(_))));
}
