use waypoint_core::{Fields, StepDescriptor, StepId, StepTable};

/// Helper function to create a linear table of required steps `1..=count`
pub fn linear_table(count: StepId) -> StepTable<Fields> {
    (1..=count)
        .fold(StepTable::builder("test"), |builder, id| {
            builder.step(StepDescriptor::new(id, format!("Step {id}")))
        })
        .build()
        .expect("Failed to build test table")
}
