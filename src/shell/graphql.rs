use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::modules::registration::use_cases::submit_registration::inbound::graphql::RegistrationQuery;
use crate::modules::students::use_cases::list_students::inbound::graphql::StudentsQuery;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(RegistrationQuery, StudentsQuery);

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(state)
        .finish()
}
