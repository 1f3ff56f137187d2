use crate::{models, Config, Error, Store};
use dotenvy::dotenv;
use std::{
    env,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

/// Store against the test database named by `DATABASE_URL`, migrated.
pub async fn test_store() -> Store {
    dotenv().ok();
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = Config {
        db_url,
        max_open: 4,
        max_idle: 2,
        max_lifetime: None,
        max_idle_lifetime: None,
        timeout_for_get: Duration::from_secs(5),
        run_migrations: true,
    };
    crate::create(&config)
        .await
        .unwrap_or_else(|err| panic!("Error connecting to {}: {err}", config.db_url))
}

/// A name no earlier test run has used.
fn unique(prefix: &str) -> String {
    static SEQUENCE: AtomicUsize = AtomicUsize::new(0);
    format!(
        "{prefix}{}x{}",
        jiff::Timestamp::now().as_microsecond(),
        SEQUENCE.fetch_add(1, Ordering::Relaxed)
    )
}

async fn new_data_type(store: &Store) -> models::DataType {
    store
        .create_data_type(models::NewDataType {
            name: unique("text"),
        })
        .await
        .expect("should create data type")
}

async fn new_field(store: &Store, data_type: &models::DataType, label: &str) -> models::Field {
    store
        .create_field(models::NewField {
            label: label.to_owned(),
            data_type_id: data_type.id,
            group_id: None,
            collection_id: None,
            status: Some(true),
            meta: Some(serde_json::json!({ "placeholder": label })),
            is_required: label.ends_with('*'),
        })
        .await
        .expect("should create field")
}

async fn new_form(store: &Store, data_type: &models::DataType) -> models::Form {
    store
        .create_form(models::NewForm {
            name: unique("form"),
            description: "fixture".to_owned(),
            data_type_id: data_type.id,
            service_id: None,
            status: None,
        })
        .await
        .expect("should create form")
}

fn binding(form: &models::Form, field: &models::Field, row: i32) -> models::NewFormField {
    models::NewFormField {
        form_id: form.id,
        field_id: field.id,
        validation: Some(serde_json::json!({ "max_length": 20 })),
        field_span: 6,
        field_row: row,
        group_id: None,
        form_group_id: None,
    }
}

/// A form with three fields bound to it, plus an empty group.
async fn bound_form(
    store: &Store,
) -> (models::Form, Vec<models::Field>, Vec<models::FormField>, models::Group) {
    let data_type = new_data_type(store).await;
    let form = new_form(store, &data_type).await;
    let mut fields = Vec::new();
    for label in ["First Name*", "Surname", "Nickname"] {
        fields.push(new_field(store, &data_type, label).await);
    }
    let bindings = store
        .create_form_fields(
            fields
                .iter()
                .enumerate()
                .map(|(row, field)| binding(&form, field, row as i32))
                .collect(),
        )
        .await
        .expect("should bind fields");
    let group = store
        .create_group(models::NewGroup {
            name: unique("group"),
        })
        .await
        .expect("should create group");
    (form, fields, bindings, group)
}

mod uniqueness {
    use super::*;

    #[tokio::test]
    async fn it_rejects_a_second_group_with_the_same_name() {
        let store = test_store().await;
        let name = unique("group");
        store
            .create_group(models::NewGroup { name: name.clone() })
            .await
            .expect("first group should be created");
        let second = store.create_group(models::NewGroup { name }).await;
        assert!(
            matches!(second, Err(Error::Constraint(_))),
            "second group should violate the unique name constraint"
        );
    }

    #[tokio::test]
    async fn it_rejects_a_second_reserved_name_with_the_same_value() {
        let store = test_store().await;
        let name = unique("root");
        store
            .create_reserved_name(models::NewReservedName { name: name.clone() })
            .await
            .expect("first reserved name should be created");
        let second = store
            .create_reserved_name(models::NewReservedName { name })
            .await;
        assert!(matches!(second, Err(Error::Constraint(_))));
    }

    #[tokio::test]
    async fn it_rejects_a_second_user_with_the_same_email() {
        let store = test_store().await;
        let email = format!("{}@example.com", unique("someone"));
        let user = |email: String| models::NewUser {
            first_name: "Ada".to_owned(),
            middle_name: String::new(),
            surname: "Lovelace".to_owned(),
            dob: None,
            email,
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
        };
        store
            .create_user(user(email.clone()))
            .await
            .expect("first user should be created");
        let second = store.create_user(user(email.clone())).await;
        assert!(matches!(second, Err(Error::Constraint(_))));
        let found = store
            .load_user_by_email(&email.to_uppercase())
            .await
            .expect("lookup by email should ignore case");
        assert_eq!(found.email, email);
    }

    #[tokio::test]
    async fn it_rejects_an_email_differing_only_in_case() {
        let store = test_store().await;
        let email = format!("{}@example.com", unique("someone"));
        let user = |email: String| models::NewUser {
            first_name: "Grace".to_owned(),
            middle_name: String::new(),
            surname: "Hopper".to_owned(),
            dob: None,
            email,
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
        };
        store
            .create_user(user(email.clone()))
            .await
            .expect("first user should be created");
        let shouted = store.create_user(user(email.to_uppercase())).await;
        assert!(
            matches!(shouted, Err(Error::Constraint(_))),
            "email uniqueness should ignore case"
        );
    }
}

mod migrations {
    use super::*;

    #[tokio::test]
    async fn it_migrates_an_up_to_date_schema_again_and_keeps_working() {
        let store = test_store().await;
        store.migrate().await.expect("second migration should be a no-op");
        store.migrate().await.expect("third migration should be a no-op");
        let group = store
            .create_group(models::NewGroup {
                name: unique("after-migrate"),
            })
            .await
            .expect("pooled connections should be usable after migrating");
        assert!(store.load_group(group.id).await.is_ok());
    }
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn it_reports_not_found_for_ids_never_created() {
        let store = test_store().await;
        assert!(matches!(store.load_group(-1).await, Err(Error::NotFound)));
        assert!(matches!(store.load_field(-1).await, Err(Error::NotFound)));
        assert!(matches!(store.load_submission(-1).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn it_round_trips_every_caller_supplied_field() {
        let store = test_store().await;
        let data_type = new_data_type(&store).await;
        let created = new_field(&store, &data_type, "Email*").await;
        let loaded = store.load_field(created.id).await.expect("should load field");
        assert_eq!(loaded.label, "Email*");
        assert_eq!(loaded.data_type_id, data_type.id);
        assert_eq!(loaded.group_id, None);
        assert_eq!(loaded.collection_id, None);
        assert_eq!(loaded.status, Some(true));
        assert_eq!(loaded.meta, Some(serde_json::json!({ "placeholder": "Email*" })));
        assert!(loaded.is_required);
        assert!(loaded.deleted.is_none());
    }

    #[tokio::test]
    async fn it_replaces_every_mutable_column_on_update() {
        let store = test_store().await;
        let data_type = new_data_type(&store).await;
        let field = new_field(&store, &data_type, "Phone").await;
        let updated = store
            .update_field(
                field.id,
                models::NewField {
                    label: "Mobile".to_owned(),
                    data_type_id: data_type.id,
                    group_id: None,
                    collection_id: None,
                    status: None,
                    meta: None,
                    is_required: true,
                },
            )
            .await
            .expect("should update field");
        assert_eq!(updated.label, "Mobile");
        assert_eq!(updated.status, None, "absent status should be stored as NULL");
        assert_eq!(updated.meta, None, "absent meta should be stored as NULL");
        assert!(updated.is_required);
        assert!(updated.updated.to_jiff() >= field.updated.to_jiff());
    }

    #[tokio::test]
    async fn it_reports_not_found_when_updating_or_deleting_a_missing_record() {
        let store = test_store().await;
        let update = store
            .update_service(
                -1,
                models::NewService {
                    name: "ghost".to_owned(),
                },
            )
            .await;
        assert!(matches!(update, Err(Error::NotFound)));
        assert!(matches!(store.delete_service(-1).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn it_refuses_to_delete_a_data_type_still_in_use() {
        let store = test_store().await;
        let data_type = new_data_type(&store).await;
        new_field(&store, &data_type, "Age").await;
        assert!(matches!(
            store.delete_data_type(data_type.id).await,
            Err(Error::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn it_lists_only_the_items_of_one_collection() {
        let store = test_store().await;
        let countries = store
            .create_collection(models::NewCollection {
                name: unique("countries"),
            })
            .await
            .expect("should create collection");
        let kenya = store
            .create_collection_item(models::NewCollectionItem {
                collection_id: Some(countries.id),
                item: "Kenya".to_owned(),
                relation_id: None,
            })
            .await
            .expect("should create item");
        store
            .create_collection_item(models::NewCollectionItem {
                collection_id: None,
                item: "Nairobi".to_owned(),
                relation_id: Some(kenya.id),
            })
            .await
            .expect("should create related item");
        let items = store
            .list_items_of_collection(countries.id)
            .await
            .expect("should list items");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item, "Kenya");
    }
}

mod group_fields {
    use super::*;

    #[tokio::test]
    async fn it_assigns_bound_fields_and_rejects_unbound_ones_without_mutating() {
        let store = test_store().await;
        let (form, fields, bindings, group) = bound_form(&store).await;
        let moved = store
            .assign_fields_to_group(form.id, group.id, &[fields[0].id, fields[1].id])
            .await
            .expect("bound fields should be assigned");
        assert_eq!(moved, 2);

        let unbound = store
            .assign_fields_to_group(form.id, group.id, &[fields[0].id, fields[1].id, i32::MAX])
            .await;
        assert!(
            matches!(&unbound, Err(Error::Validation(message)) if message.contains(&form.id.to_string())),
            "unbound field should fail validation naming the form: {unbound:?}"
        );

        let in_group = store
            .load_group_fields(form.id, group.id)
            .await
            .expect("should load group fields");
        let ids = in_group.iter().map(|f| f.field_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![fields[0].id, fields[1].id]);
        let third = store
            .load_form_field(bindings[2].id)
            .await
            .expect("third binding should still exist");
        assert_eq!(third.group_id, None, "third field should stay unassigned");
    }

    #[tokio::test]
    async fn it_leaves_every_binding_untouched_when_validation_fails() {
        let store = test_store().await;
        let (form, fields, bindings, group) = bound_form(&store).await;
        let result = store
            .assign_fields_to_group(form.id, group.id, &[fields[2].id, i32::MAX])
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        for binding in bindings {
            let reloaded = store.load_form_field(binding.id).await.expect("binding");
            assert_eq!(reloaded.group_id, None);
        }
    }

    #[tokio::test]
    async fn it_projects_field_definitions_onto_the_group_bindings() {
        let store = test_store().await;
        let (form, fields, _, group) = bound_form(&store).await;
        store
            .assign_fields_to_group(form.id, group.id, &[fields[0].id, fields[0].id])
            .await
            .expect("duplicate ids should be treated as one");
        let in_group = store
            .load_group_fields(form.id, group.id)
            .await
            .expect("should load group fields");
        assert_eq!(in_group.len(), 1);
        let first = &in_group[0];
        assert_eq!(first.form_id, form.id);
        assert_eq!(first.group_id, Some(group.id));
        assert_eq!(first.label, "First Name*");
        assert!(first.data_type.starts_with("text"));
        assert_eq!(first.meta, fields[0].meta);
        assert!(first.is_required);
        assert_eq!(first.validation, Some(serde_json::json!({ "max_length": 20 })));
        assert_eq!(first.field_span, 6);
    }

    #[tokio::test]
    async fn it_rejects_an_empty_field_list_and_a_missing_group() {
        let store = test_store().await;
        let (form, fields, _, _) = bound_form(&store).await;
        assert!(matches!(
            store.assign_fields_to_group(form.id, 1, &[]).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            store
                .assign_fields_to_group(form.id, -1, &[fields[0].id])
                .await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn it_keeps_bindings_of_a_deleted_field_but_skips_them_when_reading() {
        let store = test_store().await;
        let (form, fields, bindings, group) = bound_form(&store).await;
        store
            .assign_fields_to_group(form.id, group.id, &[fields[0].id, fields[1].id])
            .await
            .expect("should assign");
        store
            .delete_field(fields[1].id)
            .await
            .expect("should delete field");
        assert!(matches!(store.load_field(fields[1].id).await, Err(Error::NotFound)));
        assert!(matches!(store.delete_field(fields[1].id).await, Err(Error::NotFound)));
        store
            .load_form_field(bindings[1].id)
            .await
            .expect("binding should survive the field deletion");
        let in_group = store
            .load_group_fields(form.id, group.id)
            .await
            .expect("should load group fields");
        assert_eq!(
            in_group.iter().map(|f| f.field_id).collect::<Vec<_>>(),
            vec![fields[0].id]
        );
        let (_, bound) = store
            .load_form_with_fields(form.id)
            .await
            .expect("should load form with fields");
        assert_eq!(bound.len(), 2);
    }

    #[tokio::test]
    async fn it_treats_the_bindings_of_a_deleted_form_as_absent() {
        let store = test_store().await;
        let (form, fields, bindings, group) = bound_form(&store).await;
        store
            .assign_fields_to_group(form.id, group.id, &[fields[1].id])
            .await
            .expect("should assign");
        store.delete_form(form.id).await.expect("should delete form");
        assert!(matches!(store.load_form(form.id).await, Err(Error::NotFound)));

        let result = store
            .assign_fields_to_group(form.id, group.id, &[fields[0].id])
            .await;
        assert!(matches!(result, Err(Error::NotFound)), "{result:?}");
        let first = store
            .load_form_field(bindings[0].id)
            .await
            .expect("binding row should remain");
        assert_eq!(first.group_id, None, "binding of a deleted form should not move");

        let in_group = store
            .load_group_fields(form.id, group.id)
            .await
            .expect("should load group fields");
        assert!(in_group.is_empty());
    }
}

mod bindings {
    use super::*;

    #[tokio::test]
    async fn it_refuses_to_bind_to_a_deleted_form_or_field() {
        let store = test_store().await;
        let data_type = new_data_type(&store).await;
        let form = new_form(&store, &data_type).await;
        let live = new_field(&store, &data_type, "Town").await;
        let gone = new_field(&store, &data_type, "Fax").await;
        store.delete_field(gone.id).await.expect("should delete field");

        let single = store.create_form_field(binding(&form, &gone, 0)).await;
        assert!(
            matches!(&single, Err(Error::Validation(message)) if message.contains(&gone.id.to_string())),
            "{single:?}"
        );
        let batch = store
            .create_form_fields(vec![binding(&form, &live, 0), binding(&form, &gone, 1)])
            .await;
        assert!(matches!(batch, Err(Error::Validation(_))));
        let (_, bound) = store
            .load_form_with_fields(form.id)
            .await
            .expect("should load form");
        assert!(bound.is_empty(), "a rejected batch should store nothing");

        let kept = store
            .create_form_field(binding(&form, &live, 0))
            .await
            .expect("live targets should bind");
        store.delete_form(form.id).await.expect("should delete form");
        assert!(matches!(
            store.create_form_field(binding(&form, &live, 1)).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            store.update_form_field(kept.id, binding(&form, &live, 2)).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn it_reports_not_found_when_replacing_a_missing_binding() {
        let store = test_store().await;
        let data_type = new_data_type(&store).await;
        let form = new_form(&store, &data_type).await;
        let field = new_field(&store, &data_type, "Street").await;
        assert!(matches!(
            store.update_form_field(-1, binding(&form, &field, 0)).await,
            Err(Error::NotFound)
        ));
    }
}

mod form_groups {
    use super::*;

    #[tokio::test]
    async fn it_places_bindings_in_a_layout_section_until_it_is_deleted() {
        let store = test_store().await;
        let section = store
            .create_form_group(models::NewFormGroup {
                name: "Address".to_owned(),
                group_span: 12,
                group_row: 2,
            })
            .await
            .expect("should create form group");
        let data_type = new_data_type(&store).await;
        let form = new_form(&store, &data_type).await;
        let field = new_field(&store, &data_type, "Street").await;
        let placed = store
            .create_form_field(models::NewFormField {
                form_group_id: Some(section.id),
                ..binding(&form, &field, 0)
            })
            .await
            .expect("should bind into the section");
        assert_eq!(placed.form_group_id, Some(section.id));
        assert_eq!(placed.group_id, None);

        let moved = store
            .update_form_group(
                section.id,
                models::NewFormGroup {
                    name: "Postal address".to_owned(),
                    group_span: 6,
                    group_row: 3,
                },
            )
            .await
            .expect("should update form group");
        assert_eq!((moved.group_span, moved.group_row), (6, 3));

        store
            .delete_form_group(section.id)
            .await
            .expect("should delete form group");
        assert!(matches!(
            store.load_form_group(section.id).await,
            Err(Error::NotFound)
        ));
        let reloaded = store
            .load_form_field(placed.id)
            .await
            .expect("binding should survive its section");
        assert_eq!(reloaded.form_group_id, None);
    }
}

mod reserved_names {
    use super::*;

    #[tokio::test]
    async fn it_finds_names_containing_the_query_ignoring_case() {
        let store = test_store().await;
        let tag = unique("t");
        for suffix in ["admin", "administrator", "user"] {
            store
                .create_reserved_name(models::NewReservedName {
                    name: format!("{tag}{suffix}"),
                })
                .await
                .expect("should create reserved name");
        }
        let names = |found: Vec<models::ReservedName>| {
            found.into_iter().map(|r| r.name).collect::<Vec<_>>()
        };
        let expected = vec![format!("{tag}admin"), format!("{tag}administrator")];
        let found = store
            .search_reserved_names(&format!("{tag}adm"))
            .await
            .expect("should search");
        assert_eq!(names(found), expected);
        let found = store
            .search_reserved_names(&format!("{tag}ADM"))
            .await
            .expect("should search");
        assert_eq!(names(found), expected);
    }
}

mod submissions {
    use super::*;

    #[tokio::test]
    async fn it_stores_a_submission_with_all_of_its_answers() {
        let store = test_store().await;
        let (_, _, bindings, _) = bound_form(&store).await;
        let service = store
            .create_service(models::NewService {
                name: unique("licensing"),
            })
            .await
            .expect("should create service");
        let answers = bindings
            .iter()
            .map(|binding| models::NewFormAnswer {
                form_field_id: Some(binding.id),
                answer: format!("answer {}", binding.id),
                submission_id: None,
            })
            .collect::<Vec<_>>();
        let (submission, stored) = store
            .submit_form(
                models::NewSubmission {
                    service_id: Some(service.id),
                    created_by: None,
                },
                answers,
            )
            .await
            .expect("should submit");
        assert_eq!(stored.len(), 3);
        assert!(stored
            .iter()
            .all(|answer| answer.submission_id == Some(submission.id)));

        let (loaded, loaded_answers) = store
            .load_submission_with_answers(submission.id)
            .await
            .expect("should load submission");
        assert_eq!(loaded.service_id, Some(service.id));
        assert_eq!(loaded_answers.len(), 3);

        let by_service = store
            .list_submissions_by_service(service.id)
            .await
            .expect("should list by service");
        assert_eq!(by_service.len(), 1);
        assert_eq!(by_service[0].0.id, submission.id);
        assert_eq!(by_service[0].1.len(), 3);
    }

    #[tokio::test]
    async fn it_keeps_nothing_when_an_answer_fails() {
        let store = test_store().await;
        let service = store
            .create_service(models::NewService {
                name: unique("permits"),
            })
            .await
            .expect("should create service");
        let result = store
            .submit_form(
                models::NewSubmission {
                    service_id: Some(service.id),
                    created_by: None,
                },
                vec![models::NewFormAnswer {
                    form_field_id: Some(-1),
                    answer: "orphan".to_owned(),
                    submission_id: None,
                }],
            )
            .await;
        assert!(matches!(result, Err(Error::Constraint(_))));
        let by_service = store
            .list_submissions_by_service(service.id)
            .await
            .expect("should list by service");
        assert!(by_service.is_empty(), "submission should have been rolled back");
    }

    #[tokio::test]
    async fn it_creates_a_bare_submission_and_deletes_it_with_its_answers() {
        let store = test_store().await;
        let submission = store
            .create_submission(models::NewSubmission {
                service_id: None,
                created_by: None,
            })
            .await
            .expect("should create submission");
        let answer = store
            .create_form_answer(models::NewFormAnswer {
                form_field_id: None,
                answer: "late answer".to_owned(),
                submission_id: Some(submission.id),
            })
            .await
            .expect("should create answer");
        store
            .delete_submission(submission.id)
            .await
            .expect("should delete submission");
        assert!(matches!(
            store.load_form_answer(answer.id).await,
            Err(Error::NotFound)
        ));
    }
}
