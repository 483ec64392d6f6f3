pub mod fitness_class;
pub mod from_row;
pub mod goal;
pub mod input;
pub mod measurement;
pub mod member;
pub mod nutrition_log;
pub mod progress;
pub mod trainer;
pub mod transaction;
pub mod workout_log;

pub use fitness_class::{
    Booking, BookingOutcome, ClassInput, ClassOverview, FitnessClass, NewFitnessClass,
};
pub use from_row::FromSqliteRow;
pub use goal::{Goal, GoalInput, GoalProgress, GoalStatus, GoalType, GoalWithMember, NewGoal};
pub use measurement::{Measurement, MeasurementInput, NewMeasurement};
pub use member::{Member, MemberDetails, MemberInput, MembershipType};
pub use nutrition_log::{MealInput, MealType, NewNutritionLog, NutritionLog, NutritionLogWithMember};
pub use progress::ProgressEntry;
pub use trainer::{NewTrainer, Trainer, TrainerInput};
pub use transaction::{NewPayment, PaymentInput, Transaction};
pub use workout_log::{
    MemberWorkoutSummary, NewWorkoutLog, WorkoutInput, WorkoutLog, WorkoutLogWithMember,
};
