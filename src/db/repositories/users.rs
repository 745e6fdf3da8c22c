use diesel::prelude::*;

use crate::db::models::auth::{NewUser, User};

pub struct UsersRepo;

impl UsersRepo {
    pub fn insert(conn: &mut PgConnection, new_user: &NewUser) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, user_id: uuid::Uuid) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(user_id)).select(User::as_select()).first(conn).optional()
    }

    pub fn find_by_username(conn: &mut PgConnection, name: &str) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(username.eq(name)).select(User::as_select()).first(conn).optional()
    }

    /// Exact, case-sensitive match on the stored address.
    pub fn find_by_email(conn: &mut PgConnection, address: &str) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(email.eq(address)).select(User::as_select()).first(conn).optional()
    }

    pub fn exists_username(conn: &mut PgConnection, name: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(username.eq(name)))).get_result(conn)
    }

    pub fn exists_email(conn: &mut PgConnection, address: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(address)))).get_result(conn)
    }
}
