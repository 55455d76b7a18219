//! Demo data loaded into the store on startup
//!
//! Mirrors what the municipality shows in its demos: two bookings, two
//! projects, three open or assigned help requests and the approved
//! professional catalog.

use super::{
    Booking, BookingStatus, HelpCategory, HelpRequest, HelpRequestStatus, Location, Professional,
    ProfessionType, Project, ProjectCategory, ProjectStatus, Tables, Urgency, WeeklyAvailability,
};

pub fn demo_tables() -> Tables {
    Tables {
        bookings: demo_bookings(),
        projects: demo_projects(),
        pledges: Vec::new(),
        help_requests: demo_help_requests(),
        professionals: demo_professionals(),
    }
}

fn demo_bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: "1".to_string(),
            citizen_id: "user-citizen-1".to_string(),
            professional_id: "1".to_string(),
            professional_name: "Γιάννης Παπαδόπουλος".to_string(),
            profession: ProfessionType::Electrician.label().to_string(),
            service_type: "electrical".to_string(),
            scheduled_date: "2025-11-20".to_string(),
            scheduled_time: "10:00".to_string(),
            duration_hours: 2,
            address: "Λεωφ. Αλεξάνδρας 123, Αθήνα".to_string(),
            description: "Επισκευή ηλεκτρολογικού πίνακα".to_string(),
            status: BookingStatus::Confirmed,
            base_price: 100.0,
            municipality_subsidy: 70.0,
            citizen_pays: 30.0,
            created_at: "2025-11-10T10:00:00Z".to_string(),
            updated_at: "2025-11-10T10:00:00Z".to_string(),
        },
        Booking {
            id: "2".to_string(),
            citizen_id: "user-citizen-1".to_string(),
            professional_id: "2".to_string(),
            professional_name: "Μαρία Γεωργίου".to_string(),
            profession: ProfessionType::Plumber.label().to_string(),
            service_type: "plumbing".to_string(),
            scheduled_date: "2025-11-18".to_string(),
            scheduled_time: "14:00".to_string(),
            duration_hours: 3,
            address: "Πατησίων 45, Αθήνα".to_string(),
            description: "Επισκευή βρύσης κουζίνας και αλλαγή σωλήνων".to_string(),
            status: BookingStatus::Pending,
            base_price: 135.0,
            municipality_subsidy: 94.5,
            citizen_pays: 40.5,
            created_at: "2025-11-12T15:30:00Z".to_string(),
            updated_at: "2025-11-12T15:30:00Z".to_string(),
        },
    ]
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "Ανακαίνιση Παιδικής Χαράς Εξαρχείων".to_string(),
            description: "Η παιδική χαρά χρειάζεται επισκευή των παιχνιδιών και βελτίωση της ασφάλειας"
                .to_string(),
            category: ProjectCategory::Parks,
            budget_needed: 5000.0,
            budget_pledged: 2340.0,
            pledge_count: 23,
            status: ProjectStatus::Active,
            creator_id: "1".to_string(),
            creator_name: "Μαρία Παπαδοπούλου".to_string(),
            location: Location {
                address: "Πλατεία Εξαρχείων".to_string(),
                district: "Εξάρχεια".to_string(),
                lat: 37.9888,
                lng: 23.7334,
            },
            created_at: "2025-01-10".to_string(),
            updated_at: "2025-01-14".to_string(),
        },
        Project {
            id: "2".to_string(),
            title: "Δημιουργία Πράσινου Σημείου".to_string(),
            description: "Πρόταση για δημιουργία σημείου ανακύκλωσης και κομποστοποίησης".to_string(),
            category: ProjectCategory::Environment,
            budget_needed: 3500.0,
            budget_pledged: 1200.0,
            pledge_count: 15,
            status: ProjectStatus::Active,
            creator_id: "2".to_string(),
            creator_name: "Γιώργος Κωνσταντίνου".to_string(),
            location: Location {
                address: "Πάρκο Αλσους".to_string(),
                district: "Παγκράτι".to_string(),
                lat: 37.9695,
                lng: 23.7539,
            },
            created_at: "2025-01-08".to_string(),
            updated_at: "2025-01-13".to_string(),
        },
    ]
}

fn demo_help_requests() -> Vec<HelpRequest> {
    vec![
        HelpRequest {
            id: "1".to_string(),
            requester_id: "user-citizen-1".to_string(),
            requester_name: Some("Ελένη Κωνσταντίνου".to_string()),
            title: "Χρειάζομαι βοήθεια για μετακόμιση".to_string(),
            description: "Θα μετακομίσω σε νέο διαμέρισμα και χρειάζομαι βοήθεια να μεταφέρω μερικά έπιπλα (καναπές, τραπεζαρία, κρεβάτι).".to_string(),
            category: HelpCategory::Moving,
            urgency: Urgency::Medium,
            location: "Καλλιθέα, Αθήνα".to_string(),
            status: HelpRequestStatus::Open,
            volunteer_id: None,
            volunteer_name: None,
            assigned_at: None,
            images: Vec::new(),
            created_at: "2025-11-14T09:00:00Z".to_string(),
            updated_at: "2025-11-14T09:00:00Z".to_string(),
        },
        HelpRequest {
            id: "2".to_string(),
            requester_id: "user-citizen-2".to_string(),
            requester_name: Some("Γιώργος Μιχαηλίδης".to_string()),
            title: "Βοήθεια με υπολογιστή".to_string(),
            description: "Ο υπολογιστής μου δεν ανοίγει. Χρειάζομαι κάποιον να με βοηθήσει να τον φτιάξω ή να μεταφέρω τα αρχεία μου.".to_string(),
            category: HelpCategory::Technology,
            urgency: Urgency::High,
            location: "Πετράλωνα, Αθήνα".to_string(),
            status: HelpRequestStatus::Assigned,
            volunteer_id: Some("user-volunteer-1".to_string()),
            volunteer_name: Some("Μαρία Παπαδοπούλου".to_string()),
            assigned_at: Some("2025-11-14T10:30:00Z".to_string()),
            images: Vec::new(),
            created_at: "2025-11-13T16:00:00Z".to_string(),
            updated_at: "2025-11-14T10:30:00Z".to_string(),
        },
        HelpRequest {
            id: "3".to_string(),
            requester_id: "user-citizen-3".to_string(),
            requester_name: Some("Σοφία Αντωνίου".to_string()),
            title: "Συντροφιά για ηλικιωμένη".to_string(),
            description: "Η μητέρα μου είναι ηλικιωμένη και μένει μόνη. Θα ήθελα κάποιον να την επισκέπτεται 2-3 φορές την εβδομάδα για συντροφιά.".to_string(),
            category: HelpCategory::Companionship,
            urgency: Urgency::Low,
            location: "Νέα Σμύρνη, Αθήνα".to_string(),
            status: HelpRequestStatus::Open,
            volunteer_id: None,
            volunteer_name: None,
            assigned_at: None,
            images: Vec::new(),
            created_at: "2025-11-12T14:00:00Z".to_string(),
            updated_at: "2025-11-12T14:00:00Z".to_string(),
        },
    ]
}

fn demo_professionals() -> Vec<Professional> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        Professional {
            id: "1".to_string(),
            user_id: "user-1".to_string(),
            profession: ProfessionType::Electrician,
            name: "Γιάννης Παπαδόπουλος".to_string(),
            email: "john@example.com".to_string(),
            phone: "6912345678".to_string(),
            license_number: Some("EL-12345".to_string()),
            years_experience: 10,
            hourly_rate: 50.0,
            municipality_subsidized: true,
            subsidized_rate: 15.0,
            rating: 4.8,
            total_reviews: 24,
            availability: WeeklyAvailability::weekdays("09:00-17:00"),
            service_areas: strings(&["Αθήνα Κέντρο", "Καλλιθέα", "Νέα Σμύρνη"]),
            specializations: strings(&["Εγκαταστάσεις", "Επισκευές", "Συντήρηση"]),
            approved_by_municipality: true,
            bio: Some("Επαγγελματίας ηλεκτρολόγος με 10 χρόνια εμπειρίας. Εξειδικεύομαι σε οικιακές και εμπορικές εγκαταστάσεις.".to_string()),
            avatar: None,
            created_at: None,
        },
        Professional {
            id: "2".to_string(),
            user_id: "user-2".to_string(),
            profession: ProfessionType::Plumber,
            name: "Μαρία Γεωργίου".to_string(),
            email: "maria@example.com".to_string(),
            phone: "6987654321".to_string(),
            license_number: Some("PL-67890".to_string()),
            years_experience: 8,
            hourly_rate: 45.0,
            municipality_subsidized: true,
            subsidized_rate: 12.0,
            rating: 4.9,
            total_reviews: 31,
            availability: WeeklyAvailability {
                saturday: Some(strings(&["10:00-14:00"])),
                ..WeeklyAvailability::weekdays("08:00-16:00")
            },
            service_areas: strings(&["Αθήνα", "Πειραιάς", "Γλυφάδα"]),
            specializations: strings(&["Υδραυλικά", "Θέρμανση", "Επισκευές"]),
            approved_by_municipality: true,
            bio: Some("Έμπειρη υδραυλικός με εξειδίκευση σε συστήματα θέρμανσης και ηλιακούς θερμοσίφωνες.".to_string()),
            avatar: None,
            created_at: None,
        },
        Professional {
            id: "3".to_string(),
            user_id: "user-3".to_string(),
            profession: ProfessionType::Carpenter,
            name: "Κώστας Αντωνίου".to_string(),
            email: "kostas@example.com".to_string(),
            phone: "6945678901".to_string(),
            license_number: Some("CA-11111".to_string()),
            years_experience: 15,
            hourly_rate: 40.0,
            municipality_subsidized: true,
            subsidized_rate: 10.0,
            rating: 4.7,
            total_reviews: 18,
            availability: WeeklyAvailability {
                monday: None,
                saturday: Some(strings(&["09:00-13:00"])),
                ..WeeklyAvailability::weekdays("09:00-17:00")
            },
            service_areas: strings(&["Αθήνα", "Χαλάνδρι", "Μαρούσι"]),
            specializations: strings(&["Έπιπλα", "Πόρτες", "Παράθυρα"]),
            approved_by_municipality: true,
            bio: Some("Μαραγκός με πάθος για την δουλειά μου. Φτιάχνω custom έπιπλα και κάνω ανακαινίσεις.".to_string()),
            avatar: None,
            created_at: None,
        },
        Professional {
            id: "4".to_string(),
            user_id: "user-4".to_string(),
            profession: ProfessionType::Painter,
            name: "Ελένη Δημητρίου".to_string(),
            email: "eleni@example.com".to_string(),
            phone: "6933456789".to_string(),
            license_number: None,
            years_experience: 6,
            hourly_rate: 40.0,
            municipality_subsidized: true,
            subsidized_rate: 12.0,
            rating: 4.6,
            total_reviews: 12,
            availability: WeeklyAvailability::weekdays("09:00-17:00"),
            service_areas: strings(&["Αθήνα", "Ζωγράφου", "Βύρωνας"]),
            specializations: strings(&["Εσωτερικοί χώροι", "Προσόψεις"]),
            approved_by_municipality: true,
            bio: None,
            avatar: None,
            created_at: None,
        },
    ]
}
