use sonoscope::signal::{sine, SignalError};

// Runs in its own test binary so no other test has configured the process-wide
// sampling rate before this one observes the failure.
#[test]
fn generating_before_configuration_fails_fast() {
    match sine(440.0, 1.0, 1.0) {
        Err(SignalError::Configuration) => {}
        other => panic!("expected configuration error, got {other:?}"),
    }
}
