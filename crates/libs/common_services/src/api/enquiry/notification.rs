use crate::database::enquiry::Enquiry;
use crate::mail::OutgoingMail;
use app_state::MailSettings;

#[must_use]
pub fn enquiry_subject(enquiry: &Enquiry) -> String {
    format!("New Enquiry from {}: {}", enquiry.name, enquiry.subject)
}

#[must_use]
pub fn enquiry_body(enquiry: &Enquiry) -> String {
    format!(
        "Dear Team,\n\
         \n\
         You have received a new enquiry from your website.\n\
         \n\
         Details:\n\
         Name: {name}\n\
         Mobile: {mobile}\n\
         Email: {email}\n\
         Subject: {subject}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         Regards,\n\
         Website Enquiry System",
        name = enquiry.name,
        mobile = enquiry.mobile,
        email = enquiry.email,
        subject = enquiry.subject,
        message = enquiry.message,
    )
}

/// The staff notification for a stored enquiry.
#[must_use]
pub fn enquiry_notification(mail: &MailSettings, enquiry: &Enquiry) -> OutgoingMail {
    OutgoingMail {
        from: mail.from_address.clone(),
        to: vec![mail.enquiry_recipient.clone()],
        subject: enquiry_subject(enquiry),
        body: enquiry_body(enquiry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn enquiry() -> Enquiry {
        Enquiry {
            id: 3,
            name: "Asha".to_owned(),
            mobile: "9876543210".to_owned(),
            email: "asha@example.com".to_owned(),
            subject: "Bulk order".to_owned(),
            message: "Need 40 units.\nPlease call.".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn subject_line() {
        assert_eq!(enquiry_subject(&enquiry()), "New Enquiry from Asha: Bulk order");
    }

    #[test]
    fn body_template() {
        let expected = "Dear Team,

You have received a new enquiry from your website.

Details:
Name: Asha
Mobile: 9876543210
Email: asha@example.com
Subject: Bulk order

Message:
Need 40 units.
Please call.

Regards,
Website Enquiry System";
        assert_eq!(enquiry_body(&enquiry()), expected);
    }

    #[test]
    fn addressed_from_settings() {
        let settings = MailSettings {
            relay_url: None,
            from_address: "website@example.com".to_owned(),
            enquiry_recipient: "sales@example.com".to_owned(),
        };
        let mail = enquiry_notification(&settings, &enquiry());
        assert_eq!(mail.from, "website@example.com");
        assert_eq!(mail.to, vec!["sales@example.com".to_owned()]);
    }
}
