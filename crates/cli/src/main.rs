use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use mch_core::{
    api_info, config_from_env_values, pb, AncService, ChildHealthService, QuestionnaireKind,
    QuestionnaireService,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mch")]
#[command(about = "Maternal and child health calculations from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the service summary
    Info,
    /// Register a pregnancy (prints Patient and EpisodeOfCare)
    RegisterPregnancy {
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Calculate the expected delivery date
    Edd {
        /// Last menstrual period (YYYY-MM-DD)
        #[arg(long)]
        lmp: String,
    },
    /// Build the ANC contact schedule from LMP or EDD
    AncSchedule {
        /// Last menstrual period (YYYY-MM-DD); takes precedence over --edd
        #[arg(long)]
        lmp: Option<String>,
        /// Expected delivery date (YYYY-MM-DD)
        #[arg(long)]
        edd: Option<String>,
        #[arg(long)]
        patient_id: Option<String>,
    },
    /// Flag risks from visit vitals and symptoms
    AnalyzeVisit {
        #[arg(long)]
        systolic: Option<i64>,
        #[arg(long)]
        diastolic: Option<i64>,
        /// Vaginal bleeding reported
        #[arg(long)]
        bleeding: bool,
        #[arg(long)]
        patient_id: Option<String>,
    },
    /// Register a child (prints Patient)
    RegisterChild {
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Build the childhood immunization schedule
    ImmunizationSchedule {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        #[arg(long)]
        patient_id: String,
    },
    /// Assess one set of growth measurements
    Growth {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Measurement date (YYYY-MM-DD)
        #[arg(long)]
        measured: String,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        height_cm: f64,
        /// male or female
        #[arg(long)]
        gender: String,
        #[arg(long)]
        patient_id: String,
    },
    /// Print a questionnaire
    Questionnaire {
        #[arg(value_enum)]
        kind: QuestionnaireArg,
    },
}

#[derive(clap::Args)]
struct PersonArgs {
    #[arg(long)]
    given: Option<String>,
    #[arg(long)]
    family: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    birth_date: Option<String>,
    #[arg(long)]
    gender: Option<String>,
}

impl From<PersonArgs> for pb::PersonDetails {
    fn from(args: PersonArgs) -> Self {
        pb::PersonDetails {
            given_name: args.given,
            family_name: args.family,
            birth_date: args.birth_date,
            gender: args.gender,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum QuestionnaireArg {
    PatientRegistration,
    AncVisit,
    ChildHealthScreening,
}

impl From<QuestionnaireArg> for QuestionnaireKind {
    fn from(arg: QuestionnaireArg) -> Self {
        match arg {
            QuestionnaireArg::PatientRegistration => QuestionnaireKind::PatientRegistration,
            QuestionnaireArg::AncVisit => QuestionnaireKind::AncVisit,
            QuestionnaireArg::ChildHealthScreening => QuestionnaireKind::ChildHealthScreening,
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = Arc::new(config_from_env_values(
        std::env::var("MCH_SERVER_BASE_URL").ok(),
        std::env::var("MCH_GUIDELINE_BASE_URL").ok(),
    )?);
    let anc = AncService::new(cfg.clone());
    let child = ChildHealthService::new(cfg.clone());

    match cli.command {
        Some(Commands::Info) => print(&api_info())?,
        Some(Commands::RegisterPregnancy { person }) => {
            let req = pb::RegisterPregnancyReq {
                patient_details: Some(person.into()),
            };
            print(&anc.register_pregnancy(&req)?)?
        }
        Some(Commands::Edd { lmp }) => {
            let req = pb::CalculateEddReq {
                lmp_date: Some(lmp),
            };
            print(&anc.calculate_edd(&req)?)?
        }
        Some(Commands::AncSchedule {
            lmp,
            edd,
            patient_id,
        }) => {
            let req = pb::ScheduleAncVisitsReq {
                lmp_date: lmp,
                edd_date: edd,
                patient_id,
            };
            print(&anc.schedule_anc_visits(&req)?)?
        }
        Some(Commands::AnalyzeVisit {
            systolic,
            diastolic,
            bleeding,
            patient_id,
        }) => {
            let req = pb::AncVisitDataReq {
                vitals: Some(pb::Vitals {
                    bp_systolic: systolic.map(Value::from),
                    bp_diastolic: diastolic.map(Value::from),
                }),
                symptoms: Some(pb::Symptoms {
                    bleeding: Some(Value::Bool(bleeding)),
                }),
                patient_id,
            };
            print(&anc.analyze_anc_visit_data(&req))?
        }
        Some(Commands::RegisterChild { person }) => {
            let req = pb::RegisterChildReq {
                child_details: Some(person.into()),
            };
            print(&child.register_child(&req)?)?
        }
        Some(Commands::ImmunizationSchedule { dob, patient_id }) => {
            let req = pb::ImmunizationScheduleReq {
                dob: Some(dob),
                patient_id: Some(patient_id),
            };
            print(&child.immunization_schedule(&req)?)?
        }
        Some(Commands::Growth {
            dob,
            measured,
            weight_kg,
            height_cm,
            gender,
            patient_id,
        }) => {
            let req = pb::GrowthMonitoringReq {
                dob: Some(dob),
                measurement_date: Some(measured),
                weight_kg: Some(Value::from(weight_kg)),
                height_cm: Some(Value::from(height_cm)),
                gender: Some(gender),
                patient_id: Some(patient_id),
            };
            print(&child.growth_monitoring(&req)?)?
        }
        Some(Commands::Questionnaire { kind }) => {
            let questionnaires = QuestionnaireService::new(cfg);
            print(&questionnaires.get(kind.into())?)?
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
