use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Marks entities partitioned by household. Query helpers filter on this
/// before any other predicate.
pub trait HouseholdScoped {
    fn household_id(&self) -> Uuid;
}
