use mrsweep_exp::{TriggerAction, TriggerSender};

#[test]
fn receivers_cover_every_node() {
    let sender = TriggerSender::default();
    assert_eq!(
        sender.receivers_addresses(),
        vec![
            "resourcemanager-1:65432",
            "namenode-1:65432",
            "historyserver-1:65432",
            "datanode-1:65432",
            "datanode-2:65432",
            "datanode-3:65432",
        ]
    );
}

#[test]
fn start_command_carries_session_id() {
    let sender = TriggerSender {
        number_of_datanodes: 1,
        ..TriggerSender::default()
    };
    let command = sender.build_command(TriggerAction::StartMeasurement, Some("m_4-c_true"));
    assert_eq!(
        command,
        vec![
            sender.python_path.as_str(),
            "-m",
            "scanner_trigger.trigger_sender",
            "start_measurement",
            "--session_id",
            "m_4-c_true",
            "--receivers_addresses",
            "resourcemanager-1:65432,namenode-1:65432,historyserver-1:65432,datanode-1:65432",
        ]
    );
}

#[test]
fn empty_session_id_is_omitted() {
    let sender = TriggerSender::default();
    for session in [None, Some("")] {
        let command = sender.build_command(TriggerAction::StopMeasurement, session);
        assert!(!command.iter().any(|arg| arg == "--session_id"));
        assert_eq!(command[3], "stop_measurement");
    }
}

#[test]
fn environment_sets_pythonpath() {
    let sender = TriggerSender {
        pythonpath: "/opt/scanner".to_string(),
        ..TriggerSender::default()
    };
    assert_eq!(
        sender.environment(),
        vec![("PYTHONPATH".to_string(), "/opt/scanner".to_string())]
    );
}

#[test]
fn zero_datanodes_is_rejected() {
    let sender = TriggerSender {
        number_of_datanodes: 0,
        ..TriggerSender::default()
    };
    let err = sender.validate().unwrap_err();
    assert!(err.validation().expect("validation").mentions("number_of_datanodes"));
    assert_eq!(TriggerAction::StopProgram.to_string(), "stop_program");
}
