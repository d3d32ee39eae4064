// Mapped by hand onto the quoted identifiers created by the initial migration.

diesel::table! {
    #[sql_name = "Users"]
    users (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "FName"]
        #[max_length = 50]
        first_name -> Varchar,
        #[sql_name = "LName"]
        #[max_length = 50]
        last_name -> Nullable<Varchar>,
        #[sql_name = "Email"]
        #[max_length = 256]
        email -> Varchar,
    }
}
