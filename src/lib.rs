pub mod shared {
    pub mod core {
        pub mod catalog_entity;
        pub mod grade;
        pub mod reference;
        pub mod time_label;
    }
    pub mod infrastructure {
        pub mod backend;
        pub mod session_storage;
    }
}

pub mod modules {
    pub mod registration {
        pub mod core {
            pub mod availability;
            pub mod cascade;
            pub mod checkpoint;
            pub mod fees;
            pub mod math;
            pub mod offering;
            pub mod outcome;
            pub mod schedule_cache;
            pub mod selection;
        }
        pub mod use_cases {
            pub mod load_offerings {
                pub mod handler;
                pub mod source_port;
            }
            pub mod submit_registration {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod gateway_port;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod checkpoint_store;
            }
        }
    }
    pub mod students {
        pub mod core {
            pub mod debounce;
            pub mod errors;
            pub mod filter;
            pub mod pagination;
            pub mod report;
            pub mod student;
        }
        pub mod use_cases {
            pub mod list_students {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod queries_port;
            }
            pub mod delete_student {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod remover_port;
            }
            pub mod print_report {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod renderer_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod text_table_renderer;
            }
        }
    }
    pub mod catalog {
        pub mod core {
            pub mod entity;
            pub mod errors;
            pub mod schedule_group;
        }
        pub mod use_cases {
            pub mod manage_entities {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod repository_port;
            }
            pub mod manage_schedules {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod repository_port;
            }
        }
    }
}

pub mod shell;
