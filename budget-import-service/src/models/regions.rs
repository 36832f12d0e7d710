//! Static province to health-region lookup.
//!
//! Health regions 1-13 group provinces under the regional health offices.
//! The table is immutable reference data built once at first use.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static PROVINCE_HEALTH_REGIONS: Lazy<HashMap<&'static str, i16>> = Lazy::new(|| {
    let groups: [(&[&str], i16); 13] = [
        (
            &[
                "เชียงใหม่",
                "เชียงราย",
                "ลำปาง",
                "ลำพูน",
                "แพร่",
                "น่าน",
                "พะเยา",
                "แม่ฮ่องสอน",
            ],
            1,
        ),
        (
            &["พิษณุโลก", "ตาก", "เพชรบูรณ์", "สุโขทัย", "อุตรดิตถ์"],
            2,
        ),
        (
            &["นครสวรรค์", "กำแพงเพชร", "ชัยนาท", "พิจิตร", "อุทัยธานี"],
            3,
        ),
        (
            &[
                "สระบุรี",
                "นนทบุรี",
                "ปทุมธานี",
                "พระนครศรีอยุธยา",
                "ลพบุรี",
                "สิงห์บุรี",
                "อ่างทอง",
                "นครนายก",
            ],
            4,
        ),
        (
            &[
                "ราชบุรี",
                "กาญจนบุรี",
                "นครปฐม",
                "สุพรรณบุรี",
                "ประจวบคีรีขันธ์",
                "เพชรบุรี",
                "สมุทรสงคราม",
                "สมุทรสาคร",
            ],
            5,
        ),
        (
            &[
                "ระยอง",
                "จันทบุรี",
                "ฉะเชิงเทรา",
                "ชลบุรี",
                "ตราด",
                "ปราจีนบุรี",
                "สมุทรปราการ",
                "สระแก้ว",
            ],
            6,
        ),
        (&["ขอนแก่น", "กาฬสินธุ์", "มหาสารคาม", "ร้อยเอ็ด"], 7),
        (
            &[
                "อุดรธานี",
                "นครพนม",
                "บึงกาฬ",
                "เลย",
                "สกลนคร",
                "หนองคาย",
                "หนองบัวลำภู",
            ],
            8,
        ),
        (&["นครราชสีมา", "ชัยภูมิ", "บุรีรัมย์", "สุรินทร์"], 9),
        (
            &["อุบลราชธานี", "มุกดาหาร", "ยโสธร", "ศรีสะเกษ", "อำนาจเจริญ"],
            10,
        ),
        (
            &[
                "สุราษฎร์ธานี",
                "กระบี่",
                "ชุมพร",
                "นครศรีธรรมราช",
                "พังงา",
                "ภูเก็ต",
                "ระนอง",
            ],
            11,
        ),
        (
            &["สงขลา", "ตรัง", "นราธิวาส", "ปัตตานี", "พัทลุง", "ยะลา", "สตูล"],
            12,
        ),
        (&["กรุงเทพมหานคร"], 13),
    ];

    let mut map = HashMap::new();
    for (provinces, region) in groups {
        for province in provinces {
            map.insert(*province, region);
        }
    }
    map
});

/// Look up the health region for a province by its Thai name.
pub fn health_region_for_province(name: &str) -> Option<i16> {
    PROVINCE_HEALTH_REGIONS.get(name.trim()).copied()
}
