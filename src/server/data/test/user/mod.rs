use crate::server::{
    data::user::{InviteCodeRepository, UserRepository},
    model::user::{CreateUserParam, UpdateUserParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod consume_invite_code;
mod create;
mod get_all_paginated;
mod update;

fn new_user(email: &str) -> CreateUserParam {
    CreateUserParam {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        username: "tester".to_string(),
        is_admin: false,
        is_approved: false,
        invited_by: None,
        invite_code_used: Some("WELCOME".to_string()),
    }
}
