use proptest::prelude::*;
use pv_app::simulate;
use pv_controls::{Column, ControllerGains, Excitation, SimulationParameters};

fn step_params(kp: f64, ki: f64, kd: f64, kn: f64, step_time: f64) -> SimulationParameters {
    SimulationParameters::new(
        0.0,
        10.0,
        0.5,
        ControllerGains::new(kp, ki, kd, kn),
        Excitation::step(step_time),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn simulation_is_deterministic(
        kp in -5.0f64..5.0,
        ki in 0.0f64..2.0,
        kd in 0.0f64..3.0,
        kn in 0.1f64..1.0,
        step_time in 0.0f64..10.0,
    ) {
        let params = step_params(kp, ki, kd, kn, step_time);
        let a = simulate(&params).unwrap();
        let b = simulate(&params).unwrap();
        prop_assert_eq!(a.table, b.table);
    }

    #[test]
    fn outputs_are_zero_before_the_step(
        kp in -5.0f64..5.0,
        ki in 0.0f64..2.0,
        kd in 0.0f64..3.0,
        kn in 0.1f64..1.0,
        step_time in 0.25f64..10.0,
    ) {
        let params = step_params(kp, ki, kd, kn, step_time);
        let output = simulate(&params).unwrap();
        prop_assert_eq!(output.table.len(), 21);
        for row in output.table.rows().iter().filter(|r| r.t < step_time) {
            prop_assert_eq!(row.e, 0.0);
            prop_assert_eq!(row.y_p, 0.0);
            prop_assert_eq!(row.y_pi, 0.0);
            prop_assert_eq!(row.y_pid, 0.0);
        }
    }

    #[test]
    fn proportional_column_is_exact(kp in -10.0f64..10.0, amplitude in 0.1f64..5.0) {
        let params = SimulationParameters::new(
            0.0,
            10.0,
            0.5,
            ControllerGains::new(kp, 0.5, 2.0, 0.5),
            Excitation::sinusoid(amplitude),
        )
        .unwrap();
        let table = simulate(&params).unwrap().table;
        let e = table.column(Column::Excitation);
        let y_p = table.column(Column::P);
        for (e, y) in e.iter().zip(&y_p) {
            prop_assert_eq!(*y, kp * e);
        }
    }
}
