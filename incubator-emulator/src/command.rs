use incubator_api::models::{ActuatorCommand, ActuatorKind, ActuatorValue};

use crate::error::CommandError;
use crate::simulate::EnvironmentState;

/// Validate a command and apply it to the environment.
///
/// Nothing is written when the actuator name is not recognized.
pub fn dispatch(
    state: &mut EnvironmentState,
    command: &ActuatorCommand,
) -> Result<ActuatorKind, CommandError> {
    let kind = command.kind()?;

    apply(state, kind, command.value);

    Ok(kind)
}

pub fn apply(state: &mut EnvironmentState, kind: ActuatorKind, value: ActuatorValue) {
    match kind {
        ActuatorKind::Dimmer => state.dimmer_level = value.as_level(),
        ActuatorKind::Heater => state.heater_on = value.as_bool(),
        ActuatorKind::Vaporizer => state.vaporizer_on = value.as_bool(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, value: impl Into<ActuatorValue>) -> ActuatorCommand {
        ActuatorCommand {
            name: name.to_string(),
            value: value.into(),
        }
    }

    #[test]
    fn test_dimmer_is_clamped() {
        let mut state = EnvironmentState::default();

        dispatch(&mut state, &command("dimmer", 150.0)).unwrap();
        assert_eq!(state.dimmer_level, 100);

        dispatch(&mut state, &command("dimmer", -10.0)).unwrap();
        assert_eq!(state.dimmer_level, 0);

        dispatch(&mut state, &command("dimmer", 42.4)).unwrap();
        assert_eq!(state.dimmer_level, 42);

        dispatch(&mut state, &command("dimmer", true)).unwrap();
        assert_eq!(state.dimmer_level, 1);
    }

    #[test]
    fn test_switches_are_coerced() {
        let mut state = EnvironmentState::default();

        assert_eq!(
            dispatch(&mut state, &command("heater", 1.0)).unwrap(),
            ActuatorKind::Heater
        );
        assert!(state.heater_on);

        dispatch(&mut state, &command("heater", false)).unwrap();
        assert!(!state.heater_on);

        dispatch(&mut state, &command("vaporizer", true)).unwrap();
        assert!(state.vaporizer_on);

        dispatch(&mut state, &command("vaporizer", 0.0)).unwrap();
        assert!(!state.vaporizer_on);
    }

    #[test]
    fn test_unknown_actuator_leaves_state_untouched() {
        let mut state = EnvironmentState::default();
        state.heater_on = true;
        state.dimmer_level = 30;
        let before = state;

        let result = dispatch(&mut state, &command("unknown", 1.0));

        assert!(matches!(result, Err(CommandError::UnknownActuator(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_next_tick_sees_new_actuator_state() {
        let mut state = EnvironmentState::default();

        dispatch(&mut state, &command("heater", true)).unwrap();
        state.tick();

        assert!((state.temperature - 25.2).abs() < 1e-9);
    }
}
