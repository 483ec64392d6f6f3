pub mod class_repo;
pub mod goal_repo;
pub mod measurement_repo;
pub mod member_repo;
pub mod nutrition_repo;
pub mod trainer_repo;
pub mod transaction_repo;
pub mod workout_repo;

pub use class_repo::ClassRepository;
pub use goal_repo::GoalRepository;
pub use measurement_repo::MeasurementRepository;
pub use member_repo::MemberRepository;
pub use nutrition_repo::NutritionRepository;
pub use trainer_repo::TrainerRepository;
pub use transaction_repo::TransactionRepository;
pub use workout_repo::WorkoutRepository;
