//! Built-in semantic tag catalog
//!
//! The standard Location / Equipment / Point / Property hierarchy loaded
//! once at startup. Entries are ordered so every parent precedes its children.

/// A built-in tag definition
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTag {
    pub name: &'static str,
    pub parent: &'static str,
    pub label: &'static str,
    pub synonyms: &'static [&'static str],
    pub description: &'static str,
}

const fn tag(
    name: &'static str,
    parent: &'static str,
    label: &'static str,
    synonyms: &'static [&'static str],
) -> BuiltinTag {
    BuiltinTag {
        name,
        parent,
        label,
        synonyms,
        description: "",
    }
}

const fn described(
    name: &'static str,
    parent: &'static str,
    label: &'static str,
    synonyms: &'static [&'static str],
    description: &'static str,
) -> BuiltinTag {
    BuiltinTag {
        name,
        parent,
        label,
        synonyms,
        description,
    }
}

/// Descendants of the four roots
pub const BUILTIN_TAGS: &[BuiltinTag] = &[
    // Locations
    tag("Indoor", "Location", "Indoor", &["Indoors", "Inside", "Interior"]),
    tag("Apartment", "Indoor", "Apartment", &["Apartments", "Flat", "Flats"]),
    tag("Building", "Indoor", "Building", &["Buildings"]),
    tag("Garage", "Building", "Garage", &["Garages"]),
    tag("House", "Building", "House", &["Houses"]),
    tag("Shed", "Building", "Shed", &["Sheds"]),
    tag("SummerHouse", "Building", "Summer House", &["Summer Houses", "Second Home", "Second Homes"]),
    tag("Floor", "Indoor", "Floor", &["Floors"]),
    tag("GroundFloor", "Floor", "Ground Floor", &["Ground Floors", "Downstairs"]),
    tag("FirstFloor", "Floor", "First Floor", &["First Floors", "Upstairs"]),
    tag("SecondFloor", "Floor", "Second Floor", &["Second Floors"]),
    tag("ThirdFloor", "Floor", "Third Floor", &["Third Floors"]),
    tag("Attic", "Floor", "Attic", &["Attics"]),
    tag("Basement", "Floor", "Basement", &["Basements"]),
    tag("Corridor", "Indoor", "Corridor", &["Corridors", "Hallway", "Hallways"]),
    tag("Room", "Indoor", "Room", &["Rooms"]),
    tag("Bathroom", "Room", "Bathroom", &["Bathrooms", "Bath", "Baths", "Powder Room", "Powder Rooms"]),
    tag("Bedroom", "Room", "Bedroom", &["Bedrooms"]),
    tag("BoilerRoom", "Room", "Boiler Room", &["Boiler Rooms"]),
    tag("Cellar", "Room", "Cellar", &["Cellars"]),
    tag("DiningRoom", "Room", "Dining Room", &["Dining Rooms"]),
    tag("Entry", "Room", "Entry", &["Entries", "Foyer", "Foyers"]),
    tag("FamilyRoom", "Room", "Family Room", &["Family Rooms"]),
    tag("GuestRoom", "Room", "Guest Room", &["Guest Rooms"]),
    tag("Kitchen", "Room", "Kitchen", &["Kitchens"]),
    tag("LaundryRoom", "Room", "Laundry Room", &["Laundry Rooms"]),
    tag("LivingRoom", "Room", "Living Room", &["Living Rooms"]),
    tag("Office", "Room", "Office", &["Offices"]),
    tag("Veranda", "Room", "Veranda", &["Verandas"]),
    tag("Outdoor", "Location", "Outdoor", &["Outdoors", "Outside"]),
    tag("Carport", "Outdoor", "Carport", &["Carports"]),
    tag("Driveway", "Outdoor", "Driveway", &["Driveways"]),
    tag("Garden", "Outdoor", "Garden", &["Gardens"]),
    tag("Patio", "Outdoor", "Patio", &["Patios"]),
    tag("Porch", "Outdoor", "Porch", &["Porches"]),
    tag("Terrace", "Outdoor", "Terrace", &["Terraces", "Deck", "Decks"]),
    // Properties
    tag("Temperature", "Property", "Temperature", &["Temperatures"]),
    tag("Light", "Property", "Light", &["Lights", "Lighting"]),
    tag("ColorTemperature", "Property", "Color Temperature", &[]),
    tag("Humidity", "Property", "Humidity", &["Moisture"]),
    tag("Presence", "Property", "Presence", &[]),
    tag("Pressure", "Property", "Pressure", &[]),
    tag("Smoke", "Property", "Smoke", &[]),
    tag("Noise", "Property", "Noise", &[]),
    tag("Rain", "Property", "Rain", &[]),
    tag("Wind", "Property", "Wind", &[]),
    tag("Water", "Property", "Water", &[]),
    tag("CO2", "Property", "CO2", &["Carbon Dioxide"]),
    tag("CO", "Property", "CO", &["Carbon Monoxide"]),
    tag("Energy", "Property", "Energy", &[]),
    tag("Power", "Property", "Power", &[]),
    tag("Voltage", "Property", "Voltage", &[]),
    tag("Current", "Property", "Current", &[]),
    tag("Frequency", "Property", "Frequency", &[]),
    tag("Gas", "Property", "Gas", &[]),
    tag("SoundVolume", "Property", "Sound Volume", &[]),
    tag("Oil", "Property", "Oil", &[]),
    tag("Duration", "Property", "Duration", &[]),
    tag("Level", "Property", "Level", &[]),
    tag("Opening", "Property", "Opening", &[]),
    tag("Timestamp", "Property", "Timestamp", &[]),
    tag("Ultraviolet", "Property", "Ultraviolet", &["UV"]),
    tag("Vibration", "Property", "Vibration", &[]),
    // Points
    described("Alarm", "Point", "Alarm", &[], "An alarm or alert condition"),
    described("Control", "Point", "Control", &[], "A point that can be commanded"),
    tag("Switch", "Control", "Switch", &[]),
    described("Measurement", "Point", "Measurement", &[], "A sensor reading"),
    described("Setpoint", "Point", "Setpoint", &[], "A target value"),
    described("Status", "Point", "Status", &[], "A reported state"),
    tag("LowBattery", "Status", "Low Battery", &[]),
    tag("OpenLevel", "Status", "Open Level", &[]),
    tag("OpenState", "Status", "Open State", &[]),
    tag("Tampered", "Status", "Tampered", &[]),
    tag("Tilt", "Status", "Tilt", &[]),
    // Equipment
    tag("AlarmSystem", "Equipment", "Alarm System", &["Alarm Systems"]),
    tag("Battery", "Equipment", "Battery", &["Batteries"]),
    tag("Blinds", "Equipment", "Blinds", &["Rollershutter", "Rollershutters", "Roller shutter", "Roller shutters", "Shutter", "Shutters"]),
    tag("Boiler", "Equipment", "Boiler", &["Boilers"]),
    tag("Camera", "Equipment", "Camera", &["Cameras"]),
    tag("Car", "Equipment", "Car", &["Cars"]),
    tag("CleaningRobot", "Equipment", "Cleaning Robot", &["Cleaning Robots", "Vacuum robot", "Vacuum robots"]),
    tag("Door", "Equipment", "Door", &["Doors"]),
    tag("BackDoor", "Door", "Back Door", &["Back Doors"]),
    tag("CellarDoor", "Door", "Cellar Door", &["Cellar Doors"]),
    tag("FrontDoor", "Door", "Front Door", &["Front Doors", "Frontdoor", "Frontdoors"]),
    tag("GarageDoor", "Door", "Garage Door", &["Garage Doors"]),
    tag("Gate", "Door", "Gate", &["Gates"]),
    tag("InnerDoor", "Door", "Inner Door", &["Inner Doors"]),
    tag("SideDoor", "Door", "Side Door", &["Side Doors"]),
    tag("Doorbell", "Equipment", "Doorbell", &["Doorbells"]),
    tag("Fan", "Equipment", "Fan", &["Fans"]),
    tag("CeilingFan", "Fan", "Ceiling Fan", &["Ceiling Fans"]),
    tag("KitchenHood", "Fan", "Kitchen Hood", &["Kitchen Hoods"]),
    tag("HVAC", "Equipment", "HVAC", &["Heating", "Ventilation", "Air Conditioning", "A/C", "A/Cs", "AC"]),
    tag("Inverter", "Equipment", "Inverter", &["Inverters"]),
    tag("LawnMower", "Equipment", "Lawn Mower", &["Lawn Mowers"]),
    tag("Lightbulb", "Equipment", "Lightbulb", &["Lightbulbs", "Bulb", "Bulbs", "Lamp", "Lamps", "Lights", "Lighting"]),
    tag("LightStripe", "Lightbulb", "Light Stripe", &["Light Stripes"]),
    tag("Lock", "Equipment", "Lock", &["Locks"]),
    tag("NetworkAppliance", "Equipment", "Network Appliance", &["Network Appliances"]),
    tag("PowerOutlet", "Equipment", "Power Outlet", &["Power Outlets", "Outlet", "Outlets"]),
    tag("Projector", "Equipment", "Projector", &["Projectors", "Beamer", "Beamers"]),
    tag("Pump", "Equipment", "Pump", &["Pumps"]),
    tag("RadiatorControl", "Equipment", "Radiator Control", &["Radiator Controls", "Radiator", "Radiators"]),
    tag("Receiver", "Equipment", "Receiver", &["Receivers", "Audio Receiver", "Audio Receivers", "AV Receiver", "AV Receivers"]),
    tag("RemoteControl", "Equipment", "Remote Control", &["Remote Controls"]),
    tag("Screen", "Equipment", "Screen", &["Screens"]),
    tag("Television", "Screen", "Television", &["Televisions", "TV", "TVs"]),
    described("Sensor", "Equipment", "Sensor", &["Sensors"], "A device that only reports readings"),
    tag("MotionDetector", "Sensor", "Motion Detector", &["Motion Detectors", "Motion sensor", "Motion sensors"]),
    tag("SmokeDetector", "Sensor", "Smoke Detector", &["Smoke Detectors"]),
    tag("Siren", "Equipment", "Siren", &["Sirens"]),
    tag("Smartphone", "Equipment", "Smartphone", &["Smartphones", "Phone", "Phones"]),
    tag("Speaker", "Equipment", "Speaker", &["Speakers"]),
    tag("Valve", "Equipment", "Valve", &["Valves"]),
    tag("VoiceAssistant", "Equipment", "Voice Assistant", &["Voice Assistants"]),
    tag("WallSwitch", "Equipment", "Wall Switch", &["Wall Switches"]),
    tag("WebService", "Equipment", "Web Service", &["Web Services"]),
    tag("WeatherService", "WebService", "Weather Service", &["Weather Services"]),
    tag("WhiteGood", "Equipment", "White Good", &["White Goods"]),
    tag("Dishwasher", "WhiteGood", "Dishwasher", &["Dishwashers"]),
    tag("Dryer", "WhiteGood", "Dryer", &["Dryers"]),
    tag("Freezer", "WhiteGood", "Freezer", &["Freezers"]),
    tag("Oven", "WhiteGood", "Oven", &["Ovens"]),
    tag("Refrigerator", "WhiteGood", "Refrigerator", &["Refrigerators"]),
    tag("WashingMachine", "WhiteGood", "Washing Machine", &["Washing Machines"]),
    tag("Window", "Equipment", "Window", &["Windows"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use sem_core::{SemanticRoot, TagName};
    use std::collections::HashSet;

    #[test]
    fn test_parents_precede_children() {
        let mut known: HashSet<&str> = SemanticRoot::ALL.iter().map(|r| r.name()).collect();
        for tag in BUILTIN_TAGS {
            assert!(known.contains(tag.parent), "{} listed before its parent {}", tag.name, tag.parent);
            assert!(known.insert(tag.name), "duplicate built-in tag {}", tag.name);
        }
    }

    #[test]
    fn test_names_are_valid() {
        for tag in BUILTIN_TAGS {
            assert!(TagName::new(tag.name).is_ok(), "invalid built-in name {}", tag.name);
        }
    }
}
