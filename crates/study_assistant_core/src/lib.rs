pub mod domain;
pub mod planner;
pub mod ports;

pub use domain::{
    NewStudyPlan, Priority, Quiz, QuizQuestion, Reminder, StudyPlan, StudyPlanPatch, Task,
    TaskStatus, User, UserCredentials,
};
pub use ports::{DatabaseService, PortError, PortResult, QuizGenerationService, TutorService};
