use crate::models::ProductDraft;

fn draft(name: &str, description: &str, price: f64, stock: i64, category: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
        category: category.to_string(),
    }
}

pub fn init_mock_data() -> Vec<ProductDraft> {
    vec![
        draft(
            "Mechanical Keyboard",
            "Cherry MX red switches, compact 87-key layout",
            399.00,
            150,
            "Peripherals",
        ),
        draft(
            "Wireless Mouse",
            "Ergonomic design, 2.4G wireless, long battery life",
            129.00,
            300,
            "Peripherals",
        ),
        draft(
            "Monitor Stand",
            "Aluminium arm for 17-32 inch displays, rotates and lifts",
            259.00,
            80,
            "Office",
        ),
        draft(
            "Noise-Cancelling Headphones",
            "Active noise cancelling, Bluetooth 5.0, 40 hour battery",
            699.00,
            200,
            "Audio",
        ),
        draft(
            "USB-C Dock",
            "HDMI, USB 3.0, SD card and Ethernet over a single Type-C port",
            189.00,
            120,
            "Accessories",
        ),
    ]
}
