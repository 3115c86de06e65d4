//! Tests for the authentication endpoints, exercised through the full
//! router so middleware and error mapping are covered too.

mod login;
